

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{info, warn};

use crate::catalog::{BoundingBox, Catalog, Category, PoiFilter};
use crate::core::config::GuiaConfig;
use crate::core::error::CentroGuiaError;
use crate::geo::{FixedPositionProvider, Position, PositionProvider, UnavailablePositionProvider};
use crate::search::LocalSearch;
use crate::utils::safe_truncate_ellipsis;


#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct SearchLocalDataParams {
    #[schemars(description = "Natural-language request, e.g. 'restaurantes em coimbra e 3 museus perto de mim'")]
    pub query: String,
    #[schemars(description = "Caller latitude, used by 'near me' requests")]
    pub latitude: Option<f64>,
    #[schemars(description = "Caller longitude, used by 'near me' requests")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize, rmcp::schemars::JsonSchema)]
pub struct BrowseCatalogParams {
    #[schemars(description = "Category names to include (default: all), e.g. 'museus', 'praias fluviais'")]
    pub categories: Option<Vec<String>>,
    #[schemars(description = "Route identifiers; a POI on any of them is kept")]
    pub route_ids: Option<Vec<String>>,
    #[schemars(description = "Always include special-program POIs")]
    pub moeda_id_only: Option<bool>,
    #[schemars(description = "Case-insensitive text over name, description and location")]
    pub text: Option<String>,
}


#[derive(Clone)]
pub struct CentroGuiaMcpServer {
    search: Arc<LocalSearch>,
    config: Arc<GuiaConfig>,
    tool_router: ToolRouter<Self>,
}

impl CentroGuiaMcpServer {

    pub fn new(search: Arc<LocalSearch>, config: GuiaConfig) -> Self {
        Self {
            search,
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }


    fn convert_error(err: CentroGuiaError) -> McpError {
        match err {
            CentroGuiaError::Validation(msg) | CentroGuiaError::Config(msg) => {
                McpError::invalid_params(msg, None)
            }
            other => McpError::internal_error(other.to_string(), None),
        }
    }


    fn result_to_json<T: Serialize>(result: T) -> Result<String, McpError> {
        serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }
}

/// Caller position sent with a search request; both coordinates or neither.
pub fn requested_position(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<Position>, CentroGuiaError> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(CentroGuiaError::Validation(format!(
                    "position out of range: {lat}, {lon}"
                )));
            }
            Ok(Some(Position::new(lat, lon)))
        }
        (None, None) => Ok(None),
        _ => Err(CentroGuiaError::Validation(
            "latitude and longitude must be sent together".to_string(),
        )),
    }
}

pub fn build_filter(params: BrowseCatalogParams) -> Result<PoiFilter, CentroGuiaError> {
    let mut filter = PoiFilter::all();

    if let Some(names) = params.categories {
        let categories = names
            .iter()
            .map(|name| {
                Category::from_str(name.trim().to_lowercase().as_str()).map_err(|_| {
                    CentroGuiaError::Validation(format!("unknown category: {name}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        filter = filter.with_categories(categories);
    }
    if let Some(route_ids) = params.route_ids {
        filter = filter.with_routes(route_ids);
    }
    if let Some(text) = params.text {
        filter = filter.with_text(text);
    }
    Ok(filter.moeda_id_only(params.moeda_id_only.unwrap_or(false)))
}

/// Matching POIs plus the box that frames them (null when nothing matched). With a
/// text filter, also the categories that have a text hit anywhere in the catalog.
pub fn browse(catalog: &Catalog, filter: &PoiFilter) -> Value {
    let pois = catalog.filter(filter);
    let bounds = BoundingBox::from_coordinates(pois.iter().map(|poi| poi.coordinates));
    let text_categories: Vec<&str> = if filter.text.trim().is_empty() {
        Vec::new()
    } else {
        catalog
            .categories_for_text(&filter.text)
            .iter()
            .map(Category::label)
            .collect()
    };
    json!({
        "count": pois.len(),
        "pois": pois,
        "bounds": bounds,
        "center": bounds.map(|b| b.center()),
        "text_categories": text_categories,
    })
}

pub fn config_resource(config: &GuiaConfig, catalog: &Catalog) -> Value {
    json!({
        "version": env!("CARGO_PKG_VERSION"),
        "catalog": {
            "path": config.catalog_path,
            "pois": catalog.len(),
            "categories": Category::iter().map(|c| c.label()).collect::<Vec<_>>(),
        },
        "search": {
            "default_result_cap": config.default_result_cap,
            "geolocation_timeout_ms": config.geolocation_timeout_ms,
            "parse_cache_size": config.parse_cache_size,
        },
        "home_position": config.home_position(),
        "tools": ["search_local_data", "browse_catalog"],
    })
}

#[tool_router]
impl CentroGuiaMcpServer {

    #[tool(description = "Interpret a natural-language request for places in the Centro region and search the local catalog. Multi-part requests ('X em Coimbra e 3 Y perto de mim') are split and merged. Returns: [{name, category, description, location, url, coordinates, image, hasMoedaId, distance, queryContext}]")]
    async fn search_local_data(
        &self,
        Parameters(params): Parameters<SearchLocalDataParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("🔍 Searching: '{}'", safe_truncate_ellipsis(&params.query, 50));

        let position = requested_position(params.latitude, params.longitude)
            .map_err(Self::convert_error)?;

        let results = match position {
            Some(position) => {
                let provider: Arc<dyn PositionProvider> =
                    Arc::new(FixedPositionProvider::new(position));
                self.search.search_with_provider(&params.query, provider).await
            }
            None => self.search.search_local_data(&params.query).await,
        };

        info!("✅ {} result(s)", results.len());

        let json = Self::result_to_json(&results)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "Browse the catalog with explicit filters: categories, route ids, special-program toggle and free text. Returns: {count, pois, bounds, center, text_categories}")]
    async fn browse_catalog(
        &self,
        Parameters(params): Parameters<BrowseCatalogParams>,
    ) -> Result<CallToolResult, McpError> {
        let filter = build_filter(params).map_err(Self::convert_error)?;
        let response = browse(self.search.catalog(), &filter);

        let json = Self::result_to_json(&response)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}


#[tool_handler]
impl ServerHandler for CentroGuiaMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "centro-guia".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Local guide for points of interest in Portugal's Centro region. Use \
                 search_local_data for free-form requests in Portuguese or English and \
                 browse_catalog for explicit category, route or text filters."
                    .to_string(),
            ),
        }
    }


    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: vec![
                RawResource::new("config://centro-guia", "centro-guia-config".to_string())
                    .no_annotation(),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match uri.as_str() {
            "config://centro-guia" => {
                let content = serde_json::to_string_pretty(&config_resource(
                    &self.config,
                    self.search.catalog(),
                ))
                .unwrap_or_default();

                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(content, uri)],
                })
            }
            _ => Err(McpError::resource_not_found(
                format!("Unknown resource: {}", uri),
                Some(json!({ "uri": uri })),
            )),
        }
    }
}


pub async fn run_server() -> anyhow::Result<()> {
    info!("🚀 Initializing Centro Guia MCP Server...");

    let config = GuiaConfig::from_env()?;
    let catalog = Arc::new(Catalog::from_path(&config.catalog_path)?);

    let provider: Arc<dyn PositionProvider> = match config.home_position() {
        Some(home) => Arc::new(FixedPositionProvider::new(home)),
        None => {
            warn!("No home position configured, 'near me' requests stay unranked unless coordinates are sent");
            Arc::new(UnavailablePositionProvider::default())
        }
    };

    let search = Arc::new(LocalSearch::from_config(catalog, provider, &config));

    info!("✅ Centro Guia MCP Server ready");
    info!("   📍 Catalog: {} ({} POIs)", config.catalog_path.display(), search.catalog().len());
    info!("   🔢 Default cap: {}", search.default_cap());

    let server = CentroGuiaMcpServer::new(search, config);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Poi;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Poi::new(
                "Museu Nacional Machado de Castro",
                Category::Museums,
                "Escultura e pintura",
                "Coimbra",
                Position::new(40.2089, -8.4265),
            ),
            Poi::new(
                "Castelo de Penela",
                Category::Castles,
                "Fortaleza medieval",
                "Penela",
                Position::new(40.0289, -8.3897),
            )
            .with_routes(["rota-castelos"]),
            Poi::new(
                "Praia Fluvial de Avô",
                Category::RiverBeaches,
                "Zona balnear no rio Alva",
                "Oliveira do Hospital",
                Position::new(40.2953, -7.9003),
            )
            .with_moeda_id(true),
        ])
    }

    #[test]
    fn test_requested_position() {
        assert_eq!(requested_position(None, None).unwrap(), None);
        assert_eq!(
            requested_position(Some(40.2), Some(-8.4)).unwrap(),
            Some(Position::new(40.2, -8.4))
        );
        assert!(requested_position(Some(40.2), None).is_err());
        assert!(requested_position(Some(95.0), Some(0.0)).is_err());
    }

    #[test]
    fn test_build_filter_parses_categories() {
        let filter = build_filter(BrowseCatalogParams {
            categories: Some(vec!["Museus".into(), "praias fluviais".into()]),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.categories.len(), 2);
        assert!(filter.categories.contains(&Category::RiverBeaches));

        let err = build_filter(BrowseCatalogParams {
            categories: Some(vec!["zoos".into()]),
            ..Default::default()
        });
        assert!(matches!(err, Err(CentroGuiaError::Validation(_))));
    }

    #[test]
    fn test_browse_returns_pois_and_bounds() {
        let catalog = catalog();
        let filter = build_filter(BrowseCatalogParams {
            categories: Some(vec!["museus".into(), "castelos".into()]),
            ..Default::default()
        })
        .unwrap();

        let response = browse(&catalog, &filter);
        assert_eq!(response["count"], 2);
        assert_eq!(response["pois"][0]["name"], "Museu Nacional Machado de Castro");
        assert_eq!(response["bounds"]["south_west"][0], 40.0289);
        assert_eq!(response["bounds"]["north_east"][0], 40.2089);
        assert_eq!(response["center"][0], (40.0289 + 40.2089) / 2.0);
        assert!(response["text_categories"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_browse_reports_text_categories() {
        let catalog = catalog();
        let filter = build_filter(BrowseCatalogParams {
            categories: Some(vec!["museus".into()]),
            text: Some("medieval".into()),
            ..Default::default()
        })
        .unwrap();

        let response = browse(&catalog, &filter);
        assert_eq!(response["count"], 0);
        assert_eq!(response["text_categories"], json!(["castelos"]));
    }

    #[test]
    fn test_browse_empty_has_null_bounds() {
        let catalog = catalog();
        let filter = build_filter(BrowseCatalogParams {
            text: Some("xyz".into()),
            ..Default::default()
        })
        .unwrap();

        let response = browse(&catalog, &filter);
        assert_eq!(response["count"], 0);
        assert!(response["bounds"].is_null());
        assert!(response["center"].is_null());
    }

    #[test]
    fn test_config_resource() {
        let config = GuiaConfig::default();
        let value = config_resource(&config, &catalog());
        assert_eq!(value["catalog"]["pois"], 3);
        assert_eq!(value["search"]["default_result_cap"], 5);
        assert_eq!(value["catalog"]["categories"].as_array().unwrap().len(), 8);
        assert!(value["home_position"].is_null());
    }
}
