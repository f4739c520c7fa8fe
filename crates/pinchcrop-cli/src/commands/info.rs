use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pinchcrop_core::{load_image_file, CropWindowConfig, ViewportState};

#[derive(Args)]
pub struct InfoArgs {
    /// Input image (JPEG or PNG)
    pub file: PathBuf,

    /// Crop window width used for the initial viewport
    #[arg(long, default_value = "300")]
    pub width: f64,

    /// Crop window height used for the initial viewport
    #[arg(long, default_value = "300")]
    pub height: f64,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let loaded = load_image_file(&args.file)?;
    let oriented = loaded.dimensions();

    println!("File:         {}", args.file.display());
    println!(
        "Stored:       {}x{}",
        loaded.natural_width(),
        loaded.natural_height()
    );
    println!("Orientation:  {:?}", loaded.orientation());
    println!("Oriented:     {}x{}", oriented.width, oriented.height);
    if let Some(ref err) = loaded.orientation_error {
        println!("Warning:      {}", err);
    }

    let config = CropWindowConfig::with_size(args.width, args.height);
    let window = config.resolve()?;
    let state = ViewportState::initialize(oriented, window, config.scale_max)?;

    println!("Window:       {}x{}", window.width, window.height);
    println!(
        "Scale:        {:.4} ({:.4} - {:.4})",
        state.scale(),
        state.scale_bounds.scale_min,
        state.scale_bounds.scale_max
    );
    println!(
        "Position:     ({:.1}, {:.1})",
        state.transform.pos_x, state.transform.pos_y
    );

    Ok(())
}
