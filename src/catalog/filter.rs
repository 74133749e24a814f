use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::IntoEnumIterator;

use super::models::{Category, Poi};
use crate::geo::Position;

/// Browsing filter over the catalog: category and route selections, special-program
/// toggle and a free-text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoiFilter {
    pub categories: HashSet<Category>,
    pub route_ids: HashSet<String>,
    pub moeda_id_only: bool,
    pub text: String,
}

impl PoiFilter {

    pub fn all() -> Self {
        Self {
            categories: Category::iter().collect(),
            route_ids: HashSet::new(),
            moeda_id_only: false,
            text: String::new(),
        }
    }

    pub fn with_categories<I: IntoIterator<Item = Category>>(mut self, categories: I) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    pub fn with_routes<I, S>(mut self, route_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.route_ids = route_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn moeda_id_only(mut self, enabled: bool) -> Self {
        self.moeda_id_only = enabled;
        self
    }

    pub fn matches(&self, poi: &Poi) -> bool {
        // Special-program POIs bypass every other criterion while the toggle is on.
        if self.moeda_id_only && poi.has_moeda_id {
            return true;
        }

        let matches_category = self.categories.contains(&poi.category);
        let matches_route = self.route_ids.is_empty()
            || poi.route_ids.iter().any(|id| self.route_ids.contains(id));
        let matches_text = self.text.trim().is_empty() || matches_text(poi, &self.text);

        matches_category && matches_route && matches_text
    }
}

impl Default for PoiFilter {
    fn default() -> Self {
        Self::all()
    }
}

/// Case-insensitive substring match over name, description and project.
pub fn matches_text(poi: &Poi, text: &str) -> bool {
    let needle = text.trim().to_lowercase();
    poi.name.to_lowercase().contains(&needle)
        || poi.description.to_lowercase().contains(&needle)
        || poi.project.to_lowercase().contains(&needle)
}


#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south_west: Position,
    pub north_east: Position,
}

impl BoundingBox {
    pub fn from_coordinates<I: IntoIterator<Item = Position>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;

        let mut bounds = Self {
            south_west: first,
            north_east: first,
        };
        for point in points {
            bounds.south_west.latitude = bounds.south_west.latitude.min(point.latitude);
            bounds.south_west.longitude = bounds.south_west.longitude.min(point.longitude);
            bounds.north_east.latitude = bounds.north_east.latitude.max(point.latitude);
            bounds.north_east.longitude = bounds.north_east.longitude.max(point.longitude);
        }
        Some(bounds)
    }

    pub fn center(&self) -> Position {
        Position::new(
            (self.south_west.latitude + self.north_east.latitude) / 2.0,
            (self.south_west.longitude + self.north_east.longitude) / 2.0,
        )
    }
}
