//! OSMViz CLI - render a bounding box to a PNG
//!
//! Thin consumer of the osmviz library: parses arguments, builds the
//! composite, writes it out. All engine logic lives in the library.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use osmviz::{BoundingBox, CacheDirSource, ManagerConfig, OsmManager, TileSource};

#[derive(Parser, Debug)]
#[command(
    name = "osmviz",
    version,
    about = "Render a slippy-map bounding box to a single PNG, with a disk tile cache"
)]
struct Cli {
    /// Bounding box as min_lat,max_lat,min_lon,max_lon (degrees)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_bbox)]
    bbox: BoundingBox,

    /// Zoom level (grid is 2^zoom x 2^zoom tiles)
    #[arg(long, short)]
    zoom: u8,

    /// Tile server URL template containing {z}, {x} and {y}
    #[arg(long)]
    url: Option<String>,

    /// Directory for cached tiles (created if missing; falls back to the
    /// system temp directory if unusable)
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Output PNG path
    #[arg(long, short, default_value = "map.png")]
    output: PathBuf,
}

fn parse_bbox(s: &str) -> Result<BoundingBox, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err("expected four comma-separated values: min_lat,max_lat,min_lon,max_lon".into());
    }

    let mut values = [0.0_f64; 4];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse()
            .map_err(|_| format!("invalid coordinate: {part}"))?;
    }

    let [min_lat, max_lat, min_lon, max_lon] = values;
    if min_lat >= max_lat {
        return Err(format!("min_lat {min_lat} must be below max_lat {max_lat}"));
    }
    if min_lon >= max_lon {
        return Err(format!("min_lon {min_lon} must be below max_lon {max_lon}"));
    }

    Ok(BoundingBox::new(min_lat, max_lat, min_lon, max_lon))
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = ManagerConfig::default();
    if let Some(url) = cli.url {
        config = config.with_source(TileSource::new(url));
    }
    if let Some(dir) = cli.cache_dir {
        config = config.with_cache_dir(dir);
    }

    let manager = OsmManager::new(config)?;
    match manager.cache_dir_source() {
        CacheDirSource::Requested => {}
        CacheDirSource::Created => {
            eprintln!("note: created cache dir {}", manager.cache_dir().display())
        }
        CacheDirSource::Fallback => eprintln!(
            "note: caching tiles in {}",
            manager.cache_dir().display()
        ),
    }

    info!(zoom = cli.zoom, "building composite");
    let (image, covered) = manager.create_map_image(&cli.bbox, cli.zoom)?;

    image.save(&cli.output)?;
    println!(
        "wrote {} ({}x{} px)",
        cli.output.display(),
        image.width(),
        image.height()
    );
    println!(
        "covered bounds: lat {:.5}..{:.5}, lon {:.5}..{:.5}",
        covered.min_lat, covered.max_lat, covered.min_lon, covered.max_lon
    );

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            let mut cause = e.source();
            while let Some(c) = cause {
                eprintln!("  caused by: {c}");
                cause = c.source();
            }
            ExitCode::FAILURE
        }
    }
}
