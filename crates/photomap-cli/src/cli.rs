use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Photomap - plot geotagged photos on an interactive map
#[derive(Parser, Debug)]
#[command(name = "photomap")]
#[command(about = "Plot geotagged photos on an interactive map", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log every dropped photo
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest photos and write an HTML map page
    Map(MapArgs),

    /// Ingest photos and list the located ones
    Gallery(GalleryArgs),

    /// Show the GPS tags and coordinates of a single photo
    Inspect(InspectArgs),

    /// Show the effective configuration and where each value comes from
    Config,
}

/// Options shared by every command that runs the ingest pipeline
#[derive(Parser, Debug)]
pub struct IngestArgs {
    /// Photo files or directories to scan
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(long, short = 'r')]
    pub recursive: bool,

    /// Give up on a single photo after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Number of photos processed at the same time
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<usize>,

    /// Skip the full pixel decode and only sniff the image format
    #[arg(long)]
    pub no_decode: bool,
}

#[derive(Parser, Debug)]
pub struct MapArgs {
    #[command(flatten)]
    pub ingest: IngestArgs,

    /// Where to write the HTML map page
    #[arg(long, short = 'o', default_value = "map.html")]
    pub output: PathBuf,

    /// Also write the located photos as a GeoJSON FeatureCollection
    #[arg(long, value_name = "PATH")]
    pub geojson: Option<PathBuf>,

    /// Initial map center as "lat,lon"
    #[arg(long, value_name = "LAT,LON")]
    pub center: Option<String>,

    /// Initial zoom level
    #[arg(long)]
    pub zoom: Option<u8>,
}

#[derive(Parser, Debug)]
pub struct GalleryArgs {
    #[command(flatten)]
    pub ingest: IngestArgs,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Photo to inspect
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_map_command() {
        let cli = Cli::try_parse_from([
            "photomap",
            "map",
            "photos/",
            "extra.jpg",
            "-o",
            "out.html",
            "--recursive",
            "--timeout-secs",
            "10",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Map(args) => {
                assert_eq!(args.ingest.paths.len(), 2);
                assert!(args.ingest.recursive);
                assert_eq!(args.ingest.timeout_secs, Some(10));
                assert_eq!(args.output, PathBuf::from("out.html"));
                assert!(args.geojson.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_map_requires_paths() {
        assert!(Cli::try_parse_from(["photomap", "map"]).is_err());
    }

    #[test]
    fn test_default_output_path() {
        let cli = Cli::try_parse_from(["photomap", "map", "a.jpg"]).unwrap();
        match cli.command {
            Commands::Map(args) => assert_eq!(args.output, PathBuf::from("map.html")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
