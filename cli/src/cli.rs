use std::path::PathBuf;

/// Raster footprints and catalog search
#[derive(clap::Parser, Debug)]
#[command(name = "footprints", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the bounding box and footprint of a raster extent
    Footprint(FootprintArgs),

    /// Build the spatial index of a catalog and write its table
    Index(IndexArgs),

    /// List catalog items intersecting a geometry
    Search(SearchArgs),
}

#[derive(clap::Args, Debug)]
#[command(group(clap::ArgGroup::new("extent").required(true).args(["bounds", "transform"])))]
pub struct FootprintArgs {
    /// Raster bounds as minx,miny,maxx,maxy
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub bounds: Option<Vec<String>>,

    /// GDAL geotransform as six comma-separated coefficients
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub transform: Option<Vec<f64>>,

    /// Raster width in pixels (with --transform)
    #[arg(long)]
    pub width: Option<usize>,

    /// Raster height in pixels (with --transform)
    #[arg(long)]
    pub height: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct IndexArgs {
    /// Catalog file (STAC ItemCollection or JSON array of items)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub catalog: PathBuf,

    /// Output table file (.csv for CSV, JSON lines otherwise); prints to stdout if omitted
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Index options file (JSON)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Catalog file (STAC ItemCollection or JSON array of items)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub catalog: PathBuf,

    /// Query box as minx,miny,maxx,maxy
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, conflicts_with = "geometry")]
    pub bbox: Option<Vec<f64>>,

    /// Query geometry file (GeoJSON geometry or Feature)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub geometry: Option<PathBuf>,

    /// Index options file (JSON)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print matching items as a JSON FeatureCollection instead of ids
    #[arg(long)]
    pub json: bool,
}
