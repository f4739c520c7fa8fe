use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pinchcrop_core::viewport::GestureKind;
use pinchcrop_core::{CropWindowConfig, RawGesture};

use super::crop::CropScript;

#[derive(Args)]
pub struct ScriptArgs {
    /// Write the script to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save an example crop script as TOML.
pub fn run(args: &ScriptArgs) -> Result<()> {
    let script = CropScript {
        window: CropWindowConfig {
            width: 300.0,
            aspect_ratio: Some(4.0 / 3.0),
            ..Default::default()
        },
        gestures: vec![
            RawGesture {
                kind: GestureKind::Pinch,
                delta_x: 0.0,
                delta_y: 0.0,
                scale: 1.5,
            },
            RawGesture {
                kind: GestureKind::PinchEnd,
                delta_x: 0.0,
                delta_y: 0.0,
                scale: 1.0,
            },
            RawGesture {
                kind: GestureKind::Pan,
                delta_x: -20.0,
                delta_y: 10.0,
                scale: 1.0,
            },
            RawGesture {
                kind: GestureKind::PanEnd,
                delta_x: 0.0,
                delta_y: 0.0,
                scale: 1.0,
            },
        ],
    };
    let toml_str = toml::to_string_pretty(&script)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write script to {}", path.display()))?;
        println!("Example script saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
