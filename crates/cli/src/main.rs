//! geoleaf CLI - build interactive Leaflet maps from the command line

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use geoleaf_cloud::{GeoJsonReader, HttpOptions, TileClient, TileEndpoint, DEFAULT_ENDPOINT};
use geoleaf_core::document::{RasterSpec, Report, VectorSpec};
use geoleaf_core::{BasemapCatalog, Flavor, LatLng, Map, MapDocument, Outcome};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "geoleaf")]
#[command(author, version, about = "Interactive Leaflet maps from basemaps, GeoJSON and rasters", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the basemap names the catalog knows
    Basemaps {
        /// Only names containing this text (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,
        /// Also print tile URL templates
        #[arg(short, long)]
        urls: bool,
    },
    /// Build a map from a JSON document
    Render {
        /// Map document (JSON)
        document: PathBuf,
        /// Output HTML file
        #[arg(short, long, default_value = "map.html")]
        output: PathBuf,
        #[command(flatten)]
        net: NetArgs,
    },
    /// Build a one-off map from flags
    Quick {
        /// Output HTML file
        #[arg(short, long, default_value = "map.html")]
        output: PathBuf,
        /// Front-end defaults
        #[arg(long, value_enum, default_value_t = FlavorArg::Leaflet)]
        flavor: FlavorArg,
        /// Basemap name (repeatable)
        #[arg(short, long)]
        basemap: Vec<String>,
        /// GeoJSON URL or path (repeatable); named after the file stem
        #[arg(long)]
        vector: Vec<String>,
        /// Raster URL (repeatable); named after the file stem
        #[arg(long)]
        raster: Vec<String>,
        /// Colormap applied to every raster
        #[arg(long)]
        colormap: Option<String>,
        /// Raster opacity, 0 to 1
        #[arg(long, default_value = "1.0")]
        opacity: f32,
        /// Layer control corner: topleft, topright, bottomleft, bottomright
        #[arg(long)]
        control: Option<String>,
        /// Map center as LAT,LNG
        #[arg(long)]
        center: Option<String>,
        /// Initial zoom
        #[arg(short, long)]
        zoom: Option<f64>,
        #[command(flatten)]
        net: NetArgs,
    },
}

#[derive(clap::Args)]
struct NetArgs {
    /// TiTiler-compatible endpoint for raster layers
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    tile_endpoint: String,
    /// Per-request timeout in seconds (default: none)
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FlavorArg {
    Leaflet,
    Folium,
}

impl From<FlavorArg> for Flavor {
    fn from(arg: FlavorArg) -> Self {
        match arg {
            FlavorArg::Leaflet => Flavor::Leaflet,
            FlavorArg::Folium => Flavor::Folium,
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set default subscriber")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn parse_center(s: &str) -> Result<LatLng> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        bail!("Center must be LAT,LNG, got '{}'", s);
    }
    let lat: f64 = parts[0].trim().parse().context("Invalid latitude")?;
    let lng: f64 = parts[1].trim().parse().context("Invalid longitude")?;
    Ok(LatLng::new(lat, lng))
}

/// Layer name from the last path segment, without query or extension.
fn layer_name(location: &str) -> String {
    let path = location.split(['?', '#']).next().unwrap_or(location);
    let last = path.rsplit(['/', '\\']).next().unwrap_or(path);
    Path::new(last)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(location)
        .to_string()
}

fn http_options(net: &NetArgs) -> HttpOptions {
    match net.timeout {
        Some(secs) => HttpOptions::default().with_timeout(Duration::from_secs(secs)),
        None => HttpOptions::default(),
    }
}

/// Build the map with network collaborators and apply the document to it.
fn build(doc: &MapDocument, net: &NetArgs) -> Result<(Map, Report)> {
    let options = http_options(net);
    let reader = GeoJsonReader::new(options.clone()).context("Failed to create HTTP client")?;
    let endpoint = TileEndpoint::new(&net.tile_endpoint).context("Invalid tile endpoint")?;
    let tiles = TileClient::new(endpoint, options).context("Failed to create HTTP client")?;

    let mut map = doc.new_map().with_reader(reader).with_tile_service(tiles);
    let pb = spinner("Adding layers...");
    let report = doc.apply(&mut map);
    pb.finish_and_clear();
    Ok((map, report))
}

fn print_report(report: &Report) {
    for (name, outcome) in report {
        match outcome {
            Outcome::Applied => println!("  + {}", name),
            Outcome::Substituted { used, reason } => {
                println!("  ~ {} -> {} ({})", name, used, reason)
            }
            Outcome::Skipped(reason) => println!("  - {}: {}", name, reason),
        }
    }
}

fn write_map(map: &Map, path: &Path) -> Result<()> {
    let pb = spinner("Writing output...");
    map.save(path).context("Failed to write output")?;
    pb.finish_and_clear();
    Ok(())
}

fn done(map: &Map, path: &Path, elapsed: Duration) {
    println!(
        "Map with {} layer(s) saved to: {}",
        map.registry().len(),
        path.display()
    );
    println!("  Processing time: {:.2?}", elapsed);
}

#[allow(clippy::too_many_arguments)]
fn quick_document(
    flavor: FlavorArg,
    basemaps: Vec<String>,
    vectors: Vec<String>,
    rasters: Vec<String>,
    colormap: Option<String>,
    opacity: f32,
    control: Option<String>,
    center: Option<&str>,
    zoom: Option<f64>,
) -> Result<MapDocument> {
    let center = center.map(parse_center).transpose()?;
    let vectors = vectors
        .into_iter()
        .map(|url| VectorSpec {
            name: layer_name(&url),
            url: Some(url),
            data: None,
            style: None,
            highlight_style: None,
            point_style: None,
        })
        .collect();
    let rasters = rasters
        .into_iter()
        .map(|url| RasterSpec {
            name: layer_name(&url),
            url: Some(url),
            colormap: colormap.clone(),
            opacity,
        })
        .collect();
    Ok(MapDocument {
        flavor: flavor.into(),
        center,
        zoom,
        basemaps,
        vectors,
        rasters,
        layer_control: control,
        ..MapDocument::default()
    })
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Basemaps { filter, urls } => {
            let catalog = BasemapCatalog::builtin();
            let needle = filter.map(|f| f.to_lowercase());
            for name in catalog.names() {
                if let Some(n) = &needle {
                    if !name.to_lowercase().contains(n.as_str()) {
                        continue;
                    }
                }
                if urls {
                    let tiles = catalog.lookup(name)?;
                    println!("{:<28} {}", name, tiles.url);
                } else {
                    println!("{}", name);
                }
            }
        }

        Commands::Render {
            document,
            output,
            net,
        } => {
            let start = Instant::now();
            let doc = MapDocument::from_path(&document)
                .with_context(|| format!("Failed to read {}", document.display()))?;
            info!("Document: {}", document.display());
            let (map, report) = build(&doc, &net)?;
            print_report(&report);
            write_map(&map, &output)?;
            done(&map, &output, start.elapsed());
        }

        Commands::Quick {
            output,
            flavor,
            basemap,
            vector,
            raster,
            colormap,
            opacity,
            control,
            center,
            zoom,
            net,
        } => {
            let start = Instant::now();
            let doc = quick_document(
                flavor,
                basemap,
                vector,
                raster,
                colormap,
                opacity,
                control,
                center.as_deref(),
                zoom,
            )?;
            let (map, report) = build(&doc, &net)?;
            print_report(&report);
            write_map(&map, &output)?;
            done(&map, &output, start.elapsed());
        }
    }

    Ok(())
}
