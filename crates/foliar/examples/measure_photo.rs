use std::{env, path::PathBuf};

use log::{info, LevelFilter};

use foliar::core::init_with_level;
use foliar::{measure, MeasurementConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Info)?;

    let image_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/leaf.jpg"));

    let img = image::open(&image_path)?.to_rgb8();
    info!("loaded {} ({}x{})", image_path.display(), img.width(), img.height());

    let result = measure(&img, &MeasurementConfig::default())?;
    println!(
        "area: {:.2} cm2 ({})",
        result.area_cm2,
        if result.calibrated {
            "marker-calibrated"
        } else {
            "manual estimate"
        }
    );

    let out_path = image_path.with_extension("annotated.png");
    result.annotated.save(&out_path)?;
    println!("wrote {}", out_path.display());
    Ok(())
}
