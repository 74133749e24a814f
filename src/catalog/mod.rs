//! Read-only POI catalog.
//!
//! The catalog is handed over once at start-up and shared behind an `Arc` for the
//! lifetime of the process; search never mutates it.

pub mod filter;
pub mod models;

pub use filter::{BoundingBox, PoiFilter};
pub use models::{Category, Poi};

use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use crate::core::error::{CentroGuiaError, Result};


#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pois: Vec<Poi>,
}

impl Catalog {
    pub fn new(pois: Vec<Poi>) -> Self {
        let mut seen = HashSet::new();
        for poi in &pois {
            if !seen.insert(poi.name.as_str()) {
                warn!("Duplicate POI name in catalog: {}", poi.name);
            }
        }
        Self { pois }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let pois: Vec<Poi> = serde_json::from_str(json)?;
        Ok(Self::new(pois))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CentroGuiaError::Catalog(format!(
                "catalog file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        info!("Loaded {} POIs from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Poi> {
        self.pois.iter()
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Poi> {
        self.pois.iter().find(|poi| poi.name == name)
    }


    pub fn filter(&self, filter: &PoiFilter) -> Vec<&Poi> {
        self.pois.iter().filter(|poi| filter.matches(poi)).collect()
    }

    /// POIs whose name, description or project contains `text`; empty text matches nothing.
    pub fn text_search(&self, text: &str) -> Vec<&Poi> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        self.pois
            .iter()
            .filter(|poi| filter::matches_text(poi, text))
            .collect()
    }

    /// Categories present among the text-search hits, in catalog order.
    pub fn categories_for_text(&self, text: &str) -> Vec<Category> {
        let mut categories = Vec::new();
        for poi in self.text_search(text) {
            if !categories.contains(&poi.category) {
                categories.push(poi.category);
            }
        }
        categories
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Poi;
    type IntoIter = std::slice::Iter<'a, Poi>;

    fn into_iter(self) -> Self::IntoIter {
        self.pois.iter()
    }
}
