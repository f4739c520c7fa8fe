use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use pinchcrop_core::{CropSession, CropWindowConfig, GestureEvent, RawGesture};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Args)]
pub struct CropArgs {
    /// Input image (JPEG or PNG)
    pub file: PathBuf,

    /// Crop script (TOML) with the window and the gestures to replay
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output PNG file
    #[arg(short, long, default_value = "crop.png")]
    pub output: PathBuf,
}

/// Crop window plus the gestures applied to it, in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CropScript {
    pub window: CropWindowConfig,
    pub gestures: Vec<RawGesture>,
}

impl CropScript {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read crop script {}", path.display()))?;
        toml::from_str(&contents).context("Invalid crop script")
    }
}

pub fn run(args: &CropArgs) -> Result<()> {
    let script = match args.config {
        Some(ref path) => CropScript::load(path)?,
        None => CropScript {
            window: CropWindowConfig::with_size(300.0, 300.0),
            gestures: Vec::new(),
        },
    };

    let mut session = CropSession::new(script.window)?;
    session.load_file(&args.file)?;

    for gesture in &script.gestures {
        session.handle_gesture(GestureEvent::from(*gesture));
    }
    if let Some(frame) = session.take_frame() {
        info!(
            transform = %frame.css(),
            coalesced = session.coalesced_frames(),
            "Final transform"
        );
    }

    let crop = session.resolve_crop()?;
    println!(
        "Crop:    x={:.1} y={:.1} {:.1}x{:.1}",
        crop.crop_x, crop.crop_y, crop.width, crop.height
    );

    let surface = session.render_crop()?;
    let img = surface
        .to_rgb_image()
        .context("Rendered crop has an inconsistent pixel buffer")?;
    img.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!(
        "Saved:   {} ({}x{})",
        args.output.display(),
        surface.width,
        surface.height
    );

    Ok(())
}
