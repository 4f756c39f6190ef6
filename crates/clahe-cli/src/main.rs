use anyhow::{Context, Result};
use clahe_core::{dump, AxisWeight, ClaheEngine, LumaFrame, RoundingMode};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;

use config::GridArgs;

#[derive(Parser)]
#[command(name = "clahe", about = "Fixed-point tiled CLAHE golden model")]
struct Cli {
    /// TOML configuration file (flags override file values)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enhance one frame and write the result
    Enhance {
        /// Input raster file (converted to 8-bit luminance)
        input: PathBuf,
        /// Output raster file
        output: PathBuf,
        #[command(flatten)]
        grid: GridArgs,
        /// Dump per-tile CDF tables as `tile_id bin value` records
        #[arg(long)]
        dump_cdf: Option<PathBuf>,
        /// Dump output pixels as `x y value` records
        #[arg(long)]
        dump_pixels: Option<PathBuf>,
        /// Print before/after frame statistics as JSON
        #[arg(long)]
        stats: bool,
    },
    /// Compute and dump only the per-tile CDF tables
    Tables {
        /// Input raster file
        input: PathBuf,
        /// Output record file (`tile_id bin value`)
        output: PathBuf,
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Print the fixed-point weight curve and seam check for a tile geometry
    Weights {
        /// Regular tile width in pixels
        #[arg(long, default_value_t = 320)]
        tile_width: u32,
        /// Regular tile height in pixels
        #[arg(long, default_value_t = 180)]
        tile_height: u32,
        /// Fixed-point base for the weight multipliers
        #[arg(long, default_value_t = 10)]
        shift: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Enhance { input, output, grid, dump_cdf, dump_pixels, stats } => {
            let cfg = config::resolve(cli.config.as_deref(), &grid)?;
            let frame = load_luma(&input)?;
            let engine = ClaheEngine::new(frame.width, frame.height, &cfg)?;

            let tables = engine.compute_tables(&frame)?;
            let enhanced = engine.apply(&frame, &tables)?;

            if let Some(path) = dump_cdf {
                let w = BufWriter::new(File::create(&path)
                    .with_context(|| format!("creating {}", path.display()))?);
                dump::write_cdf_records(w, tables.as_slice())?;
                tracing::info!(path = %path.display(), tiles = tables.len(), "wrote CDF records");
            }
            if let Some(path) = dump_pixels {
                let w = BufWriter::new(File::create(&path)
                    .with_context(|| format!("creating {}", path.display()))?);
                dump::write_pixel_records(w, &enhanced)?;
                tracing::info!(path = %path.display(), "wrote pixel records");
            }
            if stats {
                let report = serde_json::json!({
                    "input": frame_stats(&frame),
                    "output": frame_stats(&enhanced),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }

            save_luma(&enhanced, &output)?;
            tracing::info!(path = %output.display(), "wrote enhanced frame");
        }
        Commands::Tables { input, output, grid } => {
            let cfg = config::resolve(cli.config.as_deref(), &grid)?;
            let frame = load_luma(&input)?;
            let engine = ClaheEngine::new(frame.width, frame.height, &cfg)?;
            let tables = engine.compute_tables(&frame)?;

            let w = BufWriter::new(File::create(&output)
                .with_context(|| format!("creating {}", output.display()))?);
            dump::write_cdf_records(w, tables.as_slice())?;
            tracing::info!(path = %output.display(), tiles = tables.len(), "wrote CDF records");
        }
        Commands::Weights { tile_width, tile_height, shift } => {
            print_weight_report('x', tile_width, shift);
            print_weight_report('y', tile_height, shift);
        }
    }

    Ok(())
}

fn load_luma(path: &PathBuf) -> Result<LumaFrame> {
    let img = image::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .to_luma8();
    let (width, height) = img.dimensions();
    tracing::debug!(path = %path.display(), width, height, "loaded frame");
    Ok(LumaFrame::new(img.into_raw(), width, height)?)
}

fn save_luma(frame: &LumaFrame, path: &PathBuf) -> Result<()> {
    let img = image::GrayImage::from_raw(frame.width, frame.height, frame.data.clone())
        .context("frame buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))
}

fn frame_stats(frame: &LumaFrame) -> serde_json::Value {
    let n = frame.data.len() as f64;
    let mean = frame.data.iter().map(|&b| b as f64).sum::<f64>() / n;
    let variance = frame
        .data
        .iter()
        .map(|&b| (b as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    serde_json::json!({
        "min": frame.data.iter().min().copied().unwrap_or(0),
        "max": frame.data.iter().max().copied().unwrap_or(0),
        "mean": mean,
        "stddev": variance.sqrt(),
    })
}

/// The diagnostic the hardware bring-up used: weight at the tile edges and
/// center, plus the seam transition between two adjacent tiles.
fn print_weight_report(axis: char, dim: u32, shift: u32) {
    let w = AxisWeight::for_tile_dim(dim, shift, RoundingMode::Truncate);
    let center = (dim / 2) as i32;

    println!("axis {axis}: tile dim {dim}, mult {} (shift {shift})", w.mult);
    println!("  local | d     | weight");
    for local in [0, (dim / 4) as i32, center, (3 * dim / 4) as i32, dim as i32 - 1] {
        let d = local - center;
        println!("  {local:5} | {d:5} | {:3}", w.weight(d));
    }

    let outgoing = w.weight(dim as i32 - 1 - center);
    let incoming = w.weight(-center);
    println!(
        "  seam: outgoing {} (rail 255), incoming {} (rail 0) [{}]",
        outgoing,
        incoming,
        if 255 - outgoing <= 1 && incoming <= 1 { "smooth" } else { "CHECK" }
    );
}
