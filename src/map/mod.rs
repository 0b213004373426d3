//! Map Renderer model
//!
//! Pure geometry and classification behind the dotted world map. The
//! component layer memoizes `MapData::build` on the fetched pins and
//! `SectionView::new` on the section index.

pub mod classify;
pub mod geo;
pub mod grid;

pub use classify::{DotState, PinState, SectionView, COUNTRY_DELAY, DOT_ANIMATION};
pub use grid::{Dot, ExplorePin, Grid, MapData, PlacedStoryPin};
