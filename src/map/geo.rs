//! Geographic primitives
//!
//! Embedded country outlines, Web-Mercator projection and point-in-polygon.

use std::f64::consts::PI;
use std::sync::OnceLock;

use serde::Deserialize;

/// Coarse land and country outlines, `iso_a3` = "-99" for unnamed land
const WORLD_GEOJSON: &str = include_str!("../../assets/world.geojson");

static COUNTRIES: OnceLock<Vec<CountryShape>> = OnceLock::new();

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    properties: Properties,
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Properties {
    iso_a3: String,
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum Geometry {
    Polygon(Vec<Vec<[f64; 2]>>),
    MultiPolygon(Vec<Vec<Vec<[f64; 2]>>>),
}

/// Outer ring plus holes, in (lng, lat)
#[derive(Debug, Clone)]
pub struct Polygon {
    rings: Vec<Vec<[f64; 2]>>,
    bbox: [f64; 4],
}

impl Polygon {
    pub fn new(rings: Vec<Vec<[f64; 2]>>) -> Self {
        let mut bbox = [f64::MAX, f64::MAX, f64::MIN, f64::MIN];
        if let Some(outer) = rings.first() {
            for [x, y] in outer {
                bbox[0] = bbox[0].min(*x);
                bbox[1] = bbox[1].min(*y);
                bbox[2] = bbox[2].max(*x);
                bbox[3] = bbox[3].max(*y);
            }
        }
        Self { rings, bbox }
    }

    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        if lng < self.bbox[0] || lng > self.bbox[2] || lat < self.bbox[1] || lat > self.bbox[3] {
            return false;
        }
        let Some((outer, holes)) = self.rings.split_first() else {
            return false;
        };
        ring_contains(outer, lng, lat) && !holes.iter().any(|h| ring_contains(h, lng, lat))
    }
}

/// Even-odd ray casting
fn ring_contains(ring: &[[f64; 2]], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[derive(Debug, Clone)]
pub struct CountryShape {
    pub code: String,
    pub polygons: Vec<Polygon>,
}

impl CountryShape {
    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        self.polygons.iter().any(|p| p.contains(lng, lat))
    }
}

pub fn parse_countries(geojson: &str) -> Result<Vec<CountryShape>, serde_json::Error> {
    let collection: FeatureCollection = serde_json::from_str(geojson)?;
    Ok(collection
        .features
        .into_iter()
        .map(|feature| {
            let polygons = match feature.geometry {
                Geometry::Polygon(rings) => vec![Polygon::new(rings)],
                Geometry::MultiPolygon(polys) => polys.into_iter().map(Polygon::new).collect(),
            };
            CountryShape { code: feature.properties.iso_a3, polygons }
        })
        .collect())
}

/// Embedded outlines, parsed on first use
pub fn countries() -> &'static [CountryShape] {
    COUNTRIES.get_or_init(|| {
        parse_countries(WORLD_GEOJSON).unwrap_or_else(|e| {
            log::error!("embedded world outlines are invalid: {}", e);
            Vec::new()
        })
    })
}

/// Web-Mercator northing for a latitude in degrees (unit sphere)
pub fn mercator_y(lat: f64) -> f64 {
    (PI / 4.0 + lat.to_radians() / 2.0).tan().ln()
}

/// Latitude in degrees for a Web-Mercator northing
pub fn inverse_mercator_y(y: f64) -> f64 {
    (2.0 * y.exp().atan() - PI / 2.0).to_degrees()
}

/// Web-Mercator easting for a longitude in degrees
pub fn mercator_x(lng: f64) -> f64 {
    lng.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Code carried by land outside every named country
    const UNNAMED_LAND: &str = "-99";

    fn square() -> Polygon {
        Polygon::new(vec![
            vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
            vec![[4.0, 4.0], [6.0, 4.0], [6.0, 6.0], [4.0, 6.0], [4.0, 4.0]],
        ])
    }

    #[test]
    fn test_polygon_with_hole() {
        let poly = square();
        assert!(poly.contains(1.0, 1.0));
        assert!(!poly.contains(5.0, 5.0));
        assert!(!poly.contains(11.0, 5.0));
    }

    #[test]
    fn test_mercator_round_trip() {
        for lat in [-60.0, -12.5, 0.0, 40.4168, 85.0] {
            assert!((inverse_mercator_y(mercator_y(lat)) - lat).abs() < 1e-9);
        }
    }

    #[test]
    fn test_embedded_outlines() {
        let shapes = countries();
        let find = |code: &str| shapes.iter().find(|c| c.code == code).unwrap();
        assert!(find("ESP").contains(-3.7038, 40.4168)); // Madrid
        assert!(find("GRC").contains(23.7275, 37.9838)); // Athens
        assert!(find("USA").contains(-75.1652, 39.9526)); // Philadelphia
        assert!(!find("FRA").contains(-3.7038, 40.4168));
        // Open ocean
        assert!(!shapes.iter().any(|c| c.contains(-30.0, 0.0)));
        assert!(find(UNNAMED_LAND).contains(-60.0, -10.0)); // Amazon basin
    }
}
