use anyhow::{anyhow, bail, Context, Result};
use geo::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use serde_json::{json, Value};

/// Convert a polygon into a GeoJSON geometry mapping.
/// Rings are written closed, matching what `geo::Polygon` stores.
pub fn polygon_to_geojson(polygon: &Polygon<f64>) -> Value {
    let ring_json = |ls: &LineString<f64>| -> Vec<[f64; 2]> {
        ls.coords().map(|c| [c.x, c.y]).collect()
    };

    let mut rings = vec![ring_json(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(ring_json));

    json!({
        "type": "Polygon",
        "coordinates": rings,
    })
}

/// Parse a GeoJSON geometry object into a `geo::Geometry`.
pub fn geometry_from_geojson(value: &Value) -> Result<Geometry<f64>> {
    let object = value.as_object()
        .ok_or_else(|| anyhow!("geometry must be a JSON object, got {value}"))?;
    let ty = object.get("type").and_then(Value::as_str)
        .ok_or_else(|| anyhow!("geometry has no 'type' member"))?;

    if ty == "GeometryCollection" {
        let members = object.get("geometries").and_then(Value::as_array)
            .ok_or_else(|| anyhow!("GeometryCollection has no 'geometries' array"))?;
        return Ok(Geometry::GeometryCollection(GeometryCollection(
            members.iter().map(geometry_from_geojson).collect::<Result<Vec<_>>>()?
        )));
    }

    let coords = object.get("coordinates")
        .ok_or_else(|| anyhow!("{ty} has no 'coordinates' member"))?;

    let geometry = match ty {
        "Point" => Geometry::Point(Point(parse_position(coords)?)),
        "MultiPoint" => Geometry::MultiPoint(MultiPoint(
            as_array(coords)?.iter()
                .map(|p| parse_position(p).map(Point))
                .collect::<Result<_>>()?
        )),
        "LineString" => Geometry::LineString(parse_line(coords)?),
        "MultiLineString" => Geometry::MultiLineString(MultiLineString(
            as_array(coords)?.iter().map(parse_line).collect::<Result<_>>()?
        )),
        "Polygon" => Geometry::Polygon(parse_polygon(coords)?),
        "MultiPolygon" => Geometry::MultiPolygon(MultiPolygon(
            as_array(coords)?.iter().map(parse_polygon).collect::<Result<_>>()?
        )),
        other => bail!("unsupported geometry type '{other}'"),
    };

    Ok(geometry)
}

fn as_array(value: &Value) -> Result<&Vec<Value>> {
    value.as_array().ok_or_else(|| anyhow!("expected an array, got {value}"))
}

/// Parse a single position `[x, y, ...]`; extra ordinates (z, m) are dropped.
fn parse_position(value: &Value) -> Result<Coord<f64>> {
    let pos = as_array(value)?;
    if pos.len() < 2 {
        bail!("position needs at least 2 ordinates, got {}", pos.len());
    }
    let x = pos[0].as_f64().ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
    let y = pos[1].as_f64().ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
    Ok(Coord { x, y })
}

fn parse_line(value: &Value) -> Result<LineString<f64>> {
    Ok(LineString(
        as_array(value)?.iter().map(parse_position).collect::<Result<_>>()?
    ))
}

/// Polygon coordinates: `[exterior, hole, hole, ...]`.
fn parse_polygon(value: &Value) -> Result<Polygon<f64>> {
    let rings = as_array(value)?;
    let (exterior, interiors) = rings.split_first()
        .ok_or_else(|| anyhow!("Invalid Polygon: missing exterior ring"))?;

    // Polygon::new closes open rings.
    Ok(Polygon::new(
        parse_line(exterior).context("Invalid Polygon exterior ring")?,
        interiors.iter().map(parse_line).collect::<Result<_>>()?,
    ))
}
