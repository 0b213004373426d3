//! Dot Grid
//!
//! Diagonal dot grid over the world region in Web-Mercator. Even rows are
//! shifted half a cell to the right, rows are `sqrt(3)/2` apart.

use pin_store::Pin;

use super::geo::{self, CountryShape};
use crate::story::{StoryPin, REST, STORY_COUNTRIES, STORY_PINS, VISITED_COUNTRIES};

/// Rows of the grid, in cell units
pub const MAP_HEIGHT: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

pub const WORLD_REGION: Region = Region {
    lat_min: -60.0,
    lat_max: 85.0,
    lng_min: -180.0,
    lng_max: 180.0,
};

/// Grid geometry: converts between grid cells, SVG units and lat/lng
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    height: f64,
    x_min: f64,
    x_range: f64,
    y_max: f64,
    y_range: f64,
    ystep: f64,
}

impl Grid {
    pub fn new(region: Region, height: f64) -> Self {
        let x_min = geo::mercator_x(region.lng_min);
        let x_range = geo::mercator_x(region.lng_max) - x_min;
        let y_max = geo::mercator_y(region.lat_max);
        let y_range = y_max - geo::mercator_y(region.lat_min);
        let ystep = 3f64.sqrt() / 2.0;
        let columns = (height * x_range / y_range).round().max(1.0) as usize;
        let rows = (height / ystep).ceil() as usize;
        Self { columns, rows, height, x_min, x_range, y_max, y_range, ystep }
    }

    pub fn world() -> Self {
        Self::new(WORLD_REGION, MAP_HEIGHT)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// SVG position of a cell
    pub fn position(&self, row: usize, col: usize) -> (f64, f64) {
        let x = if row % 2 == 0 { col as f64 + 0.5 } else { col as f64 };
        (x, row as f64 * self.ystep)
    }

    /// Geographic (lng, lat) of a cell
    pub fn lng_lat(&self, row: usize, col: usize) -> (f64, f64) {
        let (x, y) = self.position(row, col);
        let mx = x / self.columns as f64 * self.x_range + self.x_min;
        let my = self.y_max - y / self.height * self.y_range;
        (mx.to_degrees(), geo::inverse_mercator_y(my))
    }

    /// Nearest cell to a coordinate, as (row, col)
    pub fn nearest_cell(&self, lat: f64, lng: f64) -> (usize, usize) {
        let raw_x = self.columns as f64 * (geo::mercator_x(lng) - self.x_min) / self.x_range;
        let raw_y = self.height * (self.y_max - geo::mercator_y(lat)) / self.y_range;
        let row = (raw_y / self.ystep).round().clamp(0.0, (self.rows - 1) as f64) as usize;
        let raw_x = if row % 2 == 0 { raw_x - 0.5 } else { raw_x };
        let col = raw_x.round().clamp(0.0, (self.columns - 1) as f64) as usize;
        (row, col)
    }
}

/// A land dot
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    /// Story country containing the dot, or `REST`
    pub country: &'static str,
    /// Inside a visited country
    pub visited: bool,
}

/// Narrative city snapped to the grid
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedStoryPin {
    pub x: f64,
    pub y: f64,
    pub pin: StoryPin,
}

/// Backend pin snapped to the grid
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorePin {
    pub x: f64,
    pub y: f64,
    pub pin: Pin,
}

/// Everything the map draws, apart from per-section state
#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    pub dots: Vec<Dot>,
    /// Past first, current last so current draws on top
    pub story_pins: Vec<PlacedStoryPin>,
    pub explore_pins: Vec<ExplorePin>,
    pub width: f64,
    pub height: f64,
}

impl MapData {
    /// Build the map for a set of fetched pins
    pub fn build(records: &[Pin]) -> Self {
        build_with(Grid::world(), geo::countries(), records)
    }
}

fn shapes_for<'a>(shapes: &'a [CountryShape], codes: &[&'static str]) -> Vec<(&'static str, &'a CountryShape)> {
    codes
        .iter()
        .filter_map(|code| shapes.iter().find(|s| s.code == *code).map(|s| (*code, s)))
        .collect()
}

pub fn build_with(grid: Grid, shapes: &[CountryShape], records: &[Pin]) -> MapData {
    let story_shapes = shapes_for(shapes, STORY_COUNTRIES);
    let visited_shapes = shapes_for(shapes, VISITED_COUNTRIES);

    let pin_cells: Vec<((usize, usize), &StoryPin)> = STORY_PINS
        .iter()
        .map(|pin| (grid.nearest_cell(pin.lat, pin.lng), pin))
        .collect();

    let mut dots = Vec::new();
    let mut max_x: f64 = 0.0;
    let mut max_y: f64 = 0.0;
    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            let (lng, lat) = grid.lng_lat(row, col);
            if !shapes.iter().any(|s| s.contains(lng, lat)) {
                continue;
            }
            let (x, y) = grid.position(row, col);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            // A story pin takes over the dot in its cell
            if pin_cells.iter().any(|(cell, _)| *cell == (row, col)) {
                continue;
            }
            let country = story_shapes
                .iter()
                .find(|(_, s)| s.contains(lng, lat))
                .map(|(code, _)| *code)
                .unwrap_or(REST);
            let visited = visited_shapes.iter().any(|(_, s)| s.contains(lng, lat));
            dots.push(Dot { x, y, country, visited });
        }
    }

    let mut story_pins: Vec<PlacedStoryPin> = pin_cells
        .iter()
        .map(|((row, col), pin)| {
            let (x, y) = grid.position(*row, *col);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            PlacedStoryPin { x, y, pin: **pin }
        })
        .collect();
    story_pins.sort_by_key(|p| p.pin.category);

    let explore_pins = records
        .iter()
        .map(|pin| {
            let (row, col) = grid.nearest_cell(pin.lat, pin.lng);
            let (x, y) = grid.position(row, col);
            ExplorePin { x, y, pin: pin.clone() }
        })
        .collect();

    MapData {
        dots,
        story_pins,
        explore_pins,
        width: max_x + 1.0,
        height: max_y + 1.0,
    }
}
