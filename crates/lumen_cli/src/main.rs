//! `lumen`: render a scene description to a sequence of PPM frames.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::SceneDescription;
use lumen_renderer::{render, write_ppm, Frame, ImageBuffer, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Scene description file (JSON)
    scene: PathBuf,
    /// Directory the frames are written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
    /// File name prefix, frames are named `<prefix>-<index>.ppm`
    #[arg(long, default_value = "world")]
    prefix: String,
    /// Base random seed, frame `i` renders with `seed + i`
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Override the number of animation frames
    #[arg(long)]
    frames: Option<u32>,
    /// Render a single frame of the animation
    #[arg(long, conflicts_with = "frames")]
    frame: Option<u32>,
    /// Override the image width in pixels
    #[arg(long)]
    width: Option<u32>,
    /// Override the number of samples per pixel
    #[arg(short, long)]
    samples: Option<u32>,
    /// Override the maximum bounce depth
    #[arg(long)]
    max_depth: Option<u32>,
    /// Also write each frame as PNG
    #[arg(long)]
    png: bool,
}

fn write_frame(buffer: &ImageBuffer, dir: &Path, name: &str, png: bool) -> Result<()> {
    let ppm_path = dir.join(format!("{name}.ppm"));
    let file = File::create(&ppm_path)
        .with_context(|| format!("Failed to create {}", ppm_path.display()))?;
    write_ppm(buffer, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", ppm_path.display()))?;

    if png {
        let png_path = dir.join(format!("{name}.png"));
        let rgb = image::RgbImage::from_raw(buffer.width, buffer.height, buffer.to_rgb8())
            .context("Pixel buffer does not match image dimensions")?;
        rgb.save(&png_path)
            .with_context(|| format!("Failed to write {}", png_path.display()))?;
    }

    Ok(())
}

/// Logger configuration read from `var`, showing `info` and above when the
/// variable is unset.
fn log_env(var: &'static str) -> env_logger::Env<'static> {
    env_logger::Env::default().filter_or(var, "info")
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(log_env("RUST_LOG")).init();

    log::info!("Starting Lumen");

    let desc = SceneDescription::load(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    let base_dir = args.scene.parent().unwrap_or_else(|| Path::new("."));
    let mut world = World::from_description(&desc, base_dir)?;

    let settings = world.camera_settings_mut();
    if let Some(width) = args.width {
        settings.image_width = width;
    }
    if let Some(samples) = args.samples {
        settings.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        settings.max_depth = max_depth;
    }

    let frames = match (args.frame, args.frames) {
        (Some(frame), _) => frame..frame.saturating_add(1),
        (None, Some(count)) => 0..count,
        (None, None) => 0..world.frame_count(),
    };

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let total = Instant::now();
    for index in frames.clone() {
        let Frame { scene, mut camera } = world.frame(index);
        let mut rng = StdRng::seed_from_u64(args.seed.wrapping_add(u64::from(index)));

        let start = Instant::now();
        let image = render(&mut camera, &scene, &mut rng)
            .with_context(|| format!("Invalid camera for frame {index}"))?;
        let elapsed = start.elapsed();

        let name = format!("{}-{}", args.prefix, index);
        write_frame(&image, &args.output, &name, args.png)?;

        log::info!(
            "Frame {}: {}x{}, {} spp, {} objects in {:.2?}",
            index,
            image.width,
            image.height,
            camera.samples_per_pixel,
            scene.len(),
            elapsed
        );
    }

    log::info!(
        "Rendered {} frames to {} in {:.2?}",
        frames.len(),
        args.output.display(),
        total.elapsed()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["lumen", "scene.json", "-o", "out", "--frame", "3", "--png"]);
        assert_eq!(args.scene, PathBuf::from("scene.json"));
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.frame, Some(3));
        assert_eq!(args.prefix, "world");
        assert!(args.png);

        assert!(Args::try_parse_from(["lumen", "s.json", "--frame", "1", "--frames", "2"]).is_err());
    }

    #[test]
    fn test_log_level_from_env() {
        let unset = env_logger::Builder::from_env(log_env("LUMEN_TEST_LOG_UNSET")).build();
        assert_eq!(unset.filter(), log::LevelFilter::Info);

        std::env::set_var("LUMEN_TEST_LOG_DEBUG", "debug");
        let debug = env_logger::Builder::from_env(log_env("LUMEN_TEST_LOG_DEBUG")).build();
        assert_eq!(debug.filter(), log::LevelFilter::Debug);
    }
}
