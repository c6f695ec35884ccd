//! Launch parameter parsing for the viewer.
//!
//! On native, parameters are parsed from command-line arguments using clap.
//! On WASM, defaults are used (CLI argument parsing is not available).

use bevy::prelude::*;
use terrella::Marker;

/// Default section shown before any navigation input arrives.
const DEFAULT_SECTION: u32 = 0;
/// Default number of background stars.
const DEFAULT_STAR_COUNT: usize = 4500;
/// Default seed for the star scatter.
const DEFAULT_STAR_SEED: u64 = 42;
/// Default number of points on the interactive surface layer.
const DEFAULT_SURFACE_POINTS: usize = 30_000;

/// Launch parameters for the viewer.
#[derive(Resource, Debug, Clone)]
pub struct LaunchParams {
    /// Section index active at startup.
    pub section: u32,
    /// Extra markers rendered alongside the default landmark.
    pub markers: Vec<Marker>,
    /// Number of background stars.
    pub star_count: usize,
    /// Seed for the star scatter.
    pub star_seed: u64,
    /// Number of points on the interactive surface layer.
    pub surface_points: usize,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            section: DEFAULT_SECTION,
            markers: Vec::new(),
            star_count: DEFAULT_STAR_COUNT,
            star_seed: DEFAULT_STAR_SEED,
            surface_points: DEFAULT_SURFACE_POINTS,
        }
    }
}

#[cfg(not(target_family = "wasm"))]
mod native {
    use clap::Parser;

    use super::*;

    /// Markers parsed from a JSON file given on the command line.
    ///
    /// Wrapped so clap treats the whole file as one value rather than a
    /// multi-occurrence list.
    #[derive(Debug, Clone, Default)]
    struct MarkerSet(Vec<Marker>);

    /// Read a JSON array of `{lat, long, label?, color?}` records.
    fn parse_marker_file(path: &str) -> Result<MarkerSet, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("cannot read '{path}': {e}"))?;
        parse_markers(&contents).map(MarkerSet)
    }

    /// Parse and validate marker records from JSON text.
    fn parse_markers(source: &str) -> Result<Vec<Marker>, String> {
        let markers: Vec<Marker> =
            serde_json::from_str(source).map_err(|e| format!("invalid marker JSON: {e}"))?;

        for marker in &markers {
            if !(-90.0..=90.0).contains(&marker.lat) {
                return Err(format!("latitude out of range: {}", marker.lat));
            }
            if !(-180.0..=180.0).contains(&marker.long) {
                return Err(format!("longitude out of range: {}", marker.long));
            }
        }

        Ok(markers)
    }

    #[derive(Parser)]
    #[command(about = "Interactive globe scene with section-driven camera framing")]
    struct CliArgs {
        /// Section index active at startup (unrecognized indices fall back to 0).
        #[arg(long, default_value_t = DEFAULT_SECTION)]
        section: u32,

        /// JSON file with extra markers: [{"lat": .., "long": .., "label": ..}, ..].
        #[arg(long, value_parser = parse_marker_file)]
        markers: Option<MarkerSet>,

        /// Number of background stars.
        #[arg(long, default_value_t = DEFAULT_STAR_COUNT)]
        stars: usize,

        /// Seed for the star scatter.
        #[arg(long, default_value_t = DEFAULT_STAR_SEED)]
        seed: u64,

        /// Number of points on the interactive surface layer.
        #[arg(long, default_value_t = DEFAULT_SURFACE_POINTS)]
        points: usize,
    }

    pub fn parse() -> LaunchParams {
        let args = CliArgs::parse();
        LaunchParams {
            section: args.section,
            markers: args.markers.unwrap_or_default().0,
            star_count: args.stars,
            star_seed: args.seed,
            surface_points: args.points,
        }
    }

}

/// Parse launch parameters from CLI args (native) or use defaults (WASM).
pub fn parse() -> LaunchParams {
    #[cfg(not(target_family = "wasm"))]
    {
        native::parse()
    }
    #[cfg(target_family = "wasm")]
    {
        LaunchParams::default()
    }
}
