use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Poi};
use crate::geo::Position;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub name: String,
    pub category: Category,
    pub description: String,

    /// The POI's project label.
    pub location: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub coordinates: Position,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub has_moeda_id: bool,

    /// Kilometres from the caller, set only when nearby ranking got a position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    pub query_context: String,
}

impl SearchResult {
    pub fn from_poi(poi: &Poi, query_context: impl Into<String>) -> Self {
        Self {
            name: poi.name.clone(),
            category: poi.category,
            description: poi.description.clone(),
            location: poi.project.clone(),
            url: poi.url.clone(),
            coordinates: poi.coordinates,
            image: poi.image.clone(),
            has_moeda_id: poi.has_moeda_id,
            distance: None,
            query_context: query_context.into(),
        }
    }
}
