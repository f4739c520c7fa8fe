//! Gesture transitions.
//!
//! Continuous gestures (pan, pinch) carry values accumulated since the
//! gesture started, so each event is applied to the committed baseline and
//! never to the live transform. The matching end event moves the baseline.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::DOUBLE_TAP_SCALE;
use super::{DriftCorrection, ViewportState};

/// A recognized gesture with its payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Pan in progress, delta accumulated since the pan started.
    Pan { delta_x: f64, delta_y: f64 },
    /// Pan finished.
    PanEnd,
    /// Pinch in progress, scale factor accumulated since the pinch started.
    Pinch { scale: f64 },
    /// Pinch finished, with the recognizer's pan delta at that moment.
    PinchEnd { delta_x: f64, delta_y: f64 },
    /// Toggle between unit and double-tap zoom.
    DoubleTap,
}

/// Gesture type names as sent by hosts.
///
/// Hammer-style names without dashes are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GestureKind {
    Pan,
    #[serde(alias = "panend")]
    PanEnd,
    Pinch,
    #[serde(alias = "pinchend")]
    PinchEnd,
    #[serde(alias = "doubletap")]
    DoubleTap,
}

/// Gesture event as delivered by a host: a type plus optional payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGesture {
    #[serde(rename = "type")]
    pub kind: GestureKind,
    #[serde(default)]
    pub delta_x: f64,
    #[serde(default)]
    pub delta_y: f64,
    #[serde(default = "unit_scale", alias = "scaleFactor")]
    pub scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl From<RawGesture> for GestureEvent {
    fn from(raw: RawGesture) -> Self {
        match raw.kind {
            GestureKind::Pan => GestureEvent::Pan {
                delta_x: raw.delta_x,
                delta_y: raw.delta_y,
            },
            GestureKind::PanEnd => GestureEvent::PanEnd,
            GestureKind::Pinch => GestureEvent::Pinch { scale: raw.scale },
            GestureKind::PinchEnd => GestureEvent::PinchEnd {
                delta_x: raw.delta_x,
                delta_y: raw.delta_y,
            },
            GestureKind::DoubleTap => GestureEvent::DoubleTap,
        }
    }
}

impl GestureEvent {
    fn is_finite(&self) -> bool {
        match *self {
            GestureEvent::Pan { delta_x, delta_y } | GestureEvent::PinchEnd { delta_x, delta_y } => {
                delta_x.is_finite() && delta_y.is_finite()
            }
            GestureEvent::Pinch { scale } => scale.is_finite(),
            GestureEvent::PanEnd | GestureEvent::DoubleTap => true,
        }
    }
}

impl ViewportState {
    /// Apply one gesture and return the resulting state.
    ///
    /// Never fails. Out-of-range values are clamped and events carrying
    /// non-finite numbers leave the state unchanged.
    pub fn apply(&self, event: GestureEvent) -> ViewportState {
        if !event.is_finite() {
            debug!(?event, "Ignoring non-finite gesture");
            return *self;
        }

        let state = *self;
        match event {
            GestureEvent::Pan { delta_x, delta_y } => state.moved_to(
                state.committed.last_pos_x + delta_x - state.drift.correct_x,
                state.committed.last_pos_y + delta_y - state.drift.correct_y,
            ),
            GestureEvent::PanEnd => state.committed(),
            GestureEvent::Pinch { scale } => {
                let scale = state
                    .scale_bounds
                    .clamp(state.committed.last_scale * scale);
                state.rescaled(scale)
            }
            GestureEvent::PinchEnd { delta_x, delta_y } => {
                let mut next = state.committed();
                next.drift = DriftCorrection::from_residual(delta_x, delta_y);
                debug!(scale = next.transform.scale, drift = ?next.drift, "Pinch committed");
                next
            }
            GestureEvent::DoubleTap => {
                let target = if state.transform.scale > 1.0 {
                    1.0
                } else {
                    DOUBLE_TAP_SCALE
                };
                let next = state.rescaled(state.scale_bounds.clamp(target)).committed();
                debug!(scale = next.transform.scale, "Double tap");
                next
            }
        }
    }

    /// Apply a sequence of gestures in order.
    pub fn apply_all<I>(&self, events: I) -> ViewportState
    where
        I: IntoIterator<Item = GestureEvent>,
    {
        events
            .into_iter()
            .fold(*self, |state, event| state.apply(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{CropWindow, ImageDimensions};

    fn state() -> ViewportState {
        ViewportState::initialize(
            ImageDimensions::new(1000.0, 500.0),
            CropWindow::new(300.0, 300.0),
            1.0,
        )
        .unwrap()
    }

    fn at_unit_scale() -> ViewportState {
        state().apply_all([GestureEvent::DoubleTap, GestureEvent::DoubleTap])
    }

    fn pan(delta_x: f64, delta_y: f64) -> GestureEvent {
        GestureEvent::Pan { delta_x, delta_y }
    }

    fn pinch_end(delta_x: f64, delta_y: f64) -> GestureEvent {
        GestureEvent::PinchEnd { delta_x, delta_y }
    }

    #[test]
    fn test_pan_moves_from_committed_baseline() {
        let s = state();
        let moved = s.apply(pan(-10.0, 0.0));
        assert!((moved.transform.pos_x - -360.0).abs() < 1e-9);

        // Cumulative deltas: the second event replaces the first
        let moved = moved.apply(pan(-20.0, 0.0));
        assert!((moved.transform.pos_x - -370.0).abs() < 1e-9);

        // Pan does not commit
        assert!((moved.committed.last_pos_x - -350.0).abs() < 1e-9);
        assert!(!moved.is_at_rest());
    }

    #[test]
    fn test_pan_end_commits_position() {
        let s = state().apply_all([pan(-10.0, 0.0), GestureEvent::PanEnd]);
        assert!(s.is_at_rest());

        let s = s.apply(pan(-10.0, 0.0));
        assert!((s.transform.pos_x - -370.0).abs() < 1e-9);
    }

    #[test]
    fn test_positive_pan_clamped_at_unit_scale() {
        let s = at_unit_scale();
        assert_eq!(s.scale(), 1.0);
        assert_eq!(s.position_bounds.min_x, 0.0);

        let moved = s.apply(pan(50.0, 0.0));
        assert_eq!(moved.transform.pos_x, -300.0);

        // Past the left edge: pinned to min_x
        let moved = s.apply(pan(500.0, 0.0));
        assert_eq!(moved.transform.pos_x, 0.0);
    }

    #[test]
    fn test_pinch_clamps_to_scale_max() {
        let s = at_unit_scale().apply(GestureEvent::Pinch { scale: 3.0 });
        assert_eq!(s.scale(), 2.0);
    }

    #[test]
    fn test_pinch_clamps_to_scale_min() {
        let s = state().apply(GestureEvent::Pinch { scale: 0.1 });
        assert!((s.scale() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_pinch_is_relative_to_committed_scale() {
        let s = at_unit_scale();
        let s = s.apply(GestureEvent::Pinch { scale: 1.5 });
        let s = s.apply(GestureEvent::Pinch { scale: 1.2 });
        assert!((s.scale() - 1.2).abs() < 1e-12);
        assert!((s.committed.last_scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pinch_reclamps_position() {
        // Far right edge at scale 2, then zoom out to the minimum
        let s = at_unit_scale().apply_all([
            GestureEvent::Pinch { scale: 2.0 },
            pinch_end(0.0, 0.0),
            pan(-10000.0, -10000.0),
            GestureEvent::PanEnd,
            GestureEvent::Pinch { scale: 0.1 },
        ]);
        assert!(s.check_invariants().is_ok());
    }

    #[test]
    fn test_pinch_end_commits_and_sets_drift() {
        let s = at_unit_scale().apply_all([GestureEvent::Pinch { scale: 1.5 }, pinch_end(8.0, -4.0)]);
        assert!((s.committed.last_scale - 1.5).abs() < 1e-12);
        assert!(s.is_at_rest());
        assert_eq!(s.drift.correct_x, 8.0);
        assert_eq!(s.drift.correct_y, -4.0);
    }

    #[test]
    fn test_pinch_end_small_residual_resets_drift() {
        let s = at_unit_scale().apply_all([
            GestureEvent::Pinch { scale: 1.5 },
            pinch_end(8.0, -4.0),
            GestureEvent::Pinch { scale: 1.1 },
            pinch_end(0.5, -1.0),
        ]);
        assert!(s.drift.is_zero());
    }

    #[test]
    fn test_drift_is_subtracted_from_next_pan() {
        let s = at_unit_scale().apply_all([GestureEvent::Pinch { scale: 1.5 }, pinch_end(8.0, 0.0)]);
        let base = s.transform.pos_x;

        // The recognizer still reports the residual: no visible jump
        let moved = s.apply(pan(8.0, 0.0));
        assert!((moved.transform.pos_x - base).abs() < 1e-9);

        let moved = s.apply(pan(-12.0, 0.0));
        assert!((moved.transform.pos_x - (base - 20.0)).abs() < 1e-9);
    }

    #[test]
    fn test_double_tap_round_trip_from_unit_scale() {
        let s = at_unit_scale();
        let zoomed = s.apply(GestureEvent::DoubleTap);
        assert_eq!(zoomed.scale(), 2.0);
        assert!(zoomed.is_at_rest());

        let back = zoomed.apply(GestureEvent::DoubleTap);
        assert_eq!(back.scale(), 1.0);
        assert!(back.check_invariants().is_ok());
    }

    #[test]
    fn test_double_tap_below_unit_zooms_in() {
        let s = state().apply(GestureEvent::DoubleTap);
        assert_eq!(s.scale(), 2.0);
        assert_eq!(s.committed.last_scale, 2.0);
    }

    #[test]
    fn test_double_tap_respects_scale_min() {
        // Covering minimum is 6, above both toggle targets
        let s = ViewportState::initialize(
            ImageDimensions::new(100.0, 50.0),
            CropWindow::new(300.0, 300.0),
            1.0,
        )
        .unwrap();
        let tapped = s.apply(GestureEvent::DoubleTap);
        assert!((tapped.scale() - 6.0).abs() < 1e-12);
        assert!(tapped.check_invariants().is_ok());
    }

    #[test]
    fn test_configured_scale_max_is_kept() {
        let s = ViewportState::initialize(
            ImageDimensions::new(1000.0, 500.0),
            CropWindow::new(300.0, 300.0),
            4.0,
        )
        .unwrap();
        let s = s.apply(GestureEvent::Pinch { scale: 100.0 });
        assert_eq!(s.scale(), 4.0);
    }

    #[test]
    fn test_non_finite_gestures_are_ignored() {
        let s = state();
        assert_eq!(s.apply(pan(f64::NAN, 0.0)), s);
        assert_eq!(s.apply(GestureEvent::Pinch { scale: f64::INFINITY }), s);
    }

    #[test]
    fn test_raw_gesture_deserialize() {
        let raw: RawGesture =
            serde_json::from_str(r#"{"type": "pan", "deltaX": 12.5, "deltaY": -3}"#).unwrap();
        assert_eq!(
            GestureEvent::from(raw),
            GestureEvent::Pan {
                delta_x: 12.5,
                delta_y: -3.0
            }
        );

        let raw: RawGesture = serde_json::from_str(r#"{"type": "pinch", "scale": 1.5}"#).unwrap();
        assert_eq!(GestureEvent::from(raw), GestureEvent::Pinch { scale: 1.5 });

        let raw: RawGesture =
            serde_json::from_str(r#"{"type": "pinch", "scaleFactor": 0.5}"#).unwrap();
        assert_eq!(GestureEvent::from(raw), GestureEvent::Pinch { scale: 0.5 });
    }

    #[test]
    fn test_raw_gesture_aliases() {
        for (name, expected) in [
            ("pan-end", GestureEvent::PanEnd),
            ("panend", GestureEvent::PanEnd),
            ("double-tap", GestureEvent::DoubleTap),
            ("doubletap", GestureEvent::DoubleTap),
        ] {
            let json = format!(r#"{{"type": "{}"}}"#, name);
            let raw: RawGesture = serde_json::from_str(&json).unwrap();
            assert_eq!(GestureEvent::from(raw), expected, "type {}", name);
        }

        let raw: RawGesture = serde_json::from_str(r#"{"type": "pinchend", "deltaX": 4}"#).unwrap();
        assert_eq!(GestureEvent::from(raw), pinch_end(4.0, 0.0));
    }

    #[test]
    fn test_raw_gesture_unknown_type_rejected() {
        assert!(serde_json::from_str::<RawGesture>(r#"{"type": "swipe"}"#).is_err());
    }
}
