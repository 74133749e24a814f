use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::geo::Position;

/// Closed set of catalog categories, named as they appear in the catalog data.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Category {
    #[serde(rename = "restaurantes")]
    #[strum(serialize = "restaurantes")]
    Restaurants,

    #[serde(rename = "museus")]
    #[strum(serialize = "museus")]
    Museums,

    #[serde(rename = "castelos")]
    #[strum(serialize = "castelos")]
    Castles,

    #[serde(rename = "praias fluviais")]
    #[strum(serialize = "praias fluviais")]
    RiverBeaches,

    #[serde(rename = "aldeias de calcário")]
    #[strum(serialize = "aldeias de calcário")]
    LimestoneVillages,

    #[serde(rename = "aldeias do xisto")]
    #[strum(serialize = "aldeias do xisto")]
    SchistVillages,

    #[serde(rename = "percursos e rotas")]
    #[strum(serialize = "percursos e rotas")]
    Trails,

    #[serde(rename = "miradouros")]
    #[strum(serialize = "miradouros")]
    Viewpoints,
}

impl Category {
    pub fn label(&self) -> &'static str {
        self.into()
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poi {
    pub name: String,
    pub category: Category,
    pub description: String,

    /// Grouping label of the project the POI belongs to; doubles as its location.
    pub project: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub coordinates: Position,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default)]
    pub has_moeda_id: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub route_ids: Vec<String>,
}

impl Poi {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        description: impl Into<String>,
        project: impl Into<String>,
        coordinates: Position,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            description: description.into(),
            project: project.into(),
            url: None,
            coordinates,
            image: None,
            has_moeda_id: false,
            route_ids: Vec::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_moeda_id(mut self, has_moeda_id: bool) -> Self {
        self.has_moeda_id = has_moeda_id;
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
}
