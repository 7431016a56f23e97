use anyhow::{Context, Result};
use footprints::{bounds_to_footprint, BoundingBox, Bounds, Footprint, GeoTransform, RasterGrid};
use serde_json::json;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::FootprintArgs) -> Result<()> {
    let (bbox, footprint): (BoundingBox, Footprint) = match (&args.bounds, &args.transform) {
        (Some(bounds), _) => {
            let bounds: Bounds = bounds.iter().map(String::as_str).collect();
            bounds_to_footprint(&bounds)?
        }
        (None, Some(coeffs)) => {
            let coeffs: [f64; 6] = coeffs.as_slice().try_into()
                .context("--transform needs exactly six coefficients")?;
            let grid = RasterGrid::new(
                args.width.context("--width is required with --transform")?,
                args.height.context("--height is required with --transform")?,
                GeoTransform::from_gdal(coeffs),
            );
            bounds_to_footprint(&grid)?
        }
        (None, None) => anyhow::bail!("either --bounds or --transform is required"),
    };

    tracing::info!(?bbox, area = footprint.area(), "computed footprint");

    let out = json!({
        "bbox": bbox,
        "footprint": footprint.to_geojson(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
