//! Coalescing of transform updates into display frames.
//!
//! The host owns the actual "run before next repaint" primitive. The
//! scheduler only decides when one must be requested and which transform
//! the paint should use.

use super::Transform;

/// Single-slot paint queue.
///
/// Any number of updates between two refreshes collapse into one paint that
/// carries only the latest transform.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: Option<Transform>,
    coalesced: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new transform for the next paint.
    ///
    /// Returns true if no paint was pending, meaning the caller has to
    /// schedule a refresh callback. Otherwise the earlier request is reused.
    pub fn request(&mut self, transform: Transform) -> bool {
        let needs_frame = self.pending.is_none();
        if !needs_frame {
            self.coalesced += 1;
        }
        self.pending = Some(transform);
        needs_frame
    }

    /// Hand the latest transform to the paint callback and clear the slot.
    pub fn take(&mut self) -> Option<Transform> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending paint.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Number of updates merged into an already pending paint.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_needs_frame() {
        let mut frames = FrameScheduler::new();
        assert!(!frames.is_pending());
        assert!(frames.request(Transform::new(1.0, 0.0, 0.0)));
        assert!(frames.is_pending());
    }

    #[test]
    fn test_requests_coalesce_to_latest() {
        let mut frames = FrameScheduler::new();
        assert!(frames.request(Transform::new(1.0, 0.0, 0.0)));
        assert!(!frames.request(Transform::new(1.5, -10.0, 0.0)));
        assert!(!frames.request(Transform::new(2.0, -20.0, 5.0)));

        assert_eq!(frames.take(), Some(Transform::new(2.0, -20.0, 5.0)));
        assert_eq!(frames.take(), None);
        assert_eq!(frames.coalesced(), 2);
    }

    #[test]
    fn test_request_after_take_needs_new_frame() {
        let mut frames = FrameScheduler::new();
        frames.request(Transform::new(1.0, 0.0, 0.0));
        frames.take();
        assert!(frames.request(Transform::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_clear() {
        let mut frames = FrameScheduler::new();
        frames.request(Transform::new(1.0, 0.0, 0.0));
        frames.clear();
        assert_eq!(frames.take(), None);
    }
}
