use std::sync::Arc;

use centro_guia::dialogue::{GREETING, Orchestrator, RateLimiter, Role};
use centro_guia::geo::{FixedPositionProvider, UnavailablePositionProvider};
use centro_guia::{
    Catalog, Category, GuiaConfig, LocalSearch, PoiFilter, Position, PositionProvider,
    SearchResult,
};

const LOUSA: Position = Position {
    latitude: 40.1116,
    longitude: -8.2462,
};

fn catalog() -> Arc<Catalog> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/pois.json");
    Arc::new(Catalog::from_path(path).unwrap())
}

fn search_without_position() -> LocalSearch {
    LocalSearch::new(catalog(), Arc::new(UnavailablePositionProvider::default()))
}

fn search_from_lousa() -> LocalSearch {
    LocalSearch::new(catalog(), Arc::new(FixedPositionProvider::new(LOUSA)))
}

fn names(results: &[SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_sample_catalog_loads() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 19);
    assert!(catalog.get("Castelo de Penela").unwrap().has_moeda_id);
}

#[tokio::test]
async fn test_category_and_location() {
    let results = search_without_position()
        .search_local_data("Restaurantes em Coimbra")
        .await;

    assert_eq!(
        names(&results),
        vec!["Restaurante Zé Manel dos Ossos", "Restaurante Solar do Bacalhau"]
    );
    assert!(results.iter().all(|r| r.location == "Coimbra"));
    assert!(results.iter().all(|r| r.distance.is_none()));
    assert_eq!(results[0].query_context, "restaurantes em coimbra");
}

#[tokio::test]
async fn test_compound_request_keeps_part_order() {
    let results = search_without_position()
        .search_local_data("2 museus em coimbra e castelos na lousã")
        .await;

    assert_eq!(
        names(&results),
        vec![
            "Museu Nacional Machado de Castro",
            "Museu da Ciência da Universidade de Coimbra",
            "Castelo da Lousã",
        ]
    );
    assert_eq!(results[2].query_context, "castelos na lousã");
}

#[tokio::test]
async fn test_generic_villages_fan_out() {
    let results = search_without_position().search_local_data("aldeias na lousa").await;

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.category == Category::SchistVillages));

    let everywhere = search_without_position().search_local_data("aldeias").await;
    assert_eq!(everywhere[0].category, Category::LimestoneVillages);
    assert_eq!(everywhere.len(), 4);
}

#[tokio::test]
async fn test_nearby_ranked_and_capped() {
    let results = search_from_lousa().search_local_data("3 museus perto de mim").await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].name, "Museu Etnográfico da Lousã");
    assert!(results.iter().all(|r| r.distance.is_some()));
    assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
    assert!(!names(&results).contains(&"Museu Municipal de Arganil"));
}

#[tokio::test]
async fn test_nearby_without_position_stays_unranked() {
    let results = search_without_position()
        .search_local_data("museus perto de mim")
        .await;

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].name, "Museu Nacional Machado de Castro");
    assert!(results.iter().all(|r| r.distance.is_none()));
}

#[tokio::test]
async fn test_caller_position_overrides_default_provider() {
    let search = search_without_position();
    let avo: Arc<dyn PositionProvider> =
        Arc::new(FixedPositionProvider::new(Position::new(40.2953, -7.9003)));

    let results = search.search_with_provider("praias nearby", avo).await;
    assert_eq!(results[0].name, "Praia Fluvial de Avô");
    assert!(results[0].distance.unwrap() < 0.01);
}

#[tokio::test]
async fn test_location_only_ignores_filler_words() {
    let search = search_without_position();

    for query in [
        "o que visitar em coimbra",
        "sugestões para coimbra",
        "lugares em coimbra",
        "o que há em coimbra",
    ] {
        let results = search.search_local_data(query).await;
        assert_eq!(results.len(), 5, "{query}");
        assert!(results.iter().all(|r| r.location.to_lowercase().contains("coimbra")));
        assert_eq!(results[0].name, "Restaurante Zé Manel dos Ossos");
    }
}

#[tokio::test]
async fn test_number_word_caps_results() {
    let search = search_without_position();

    let results = search.search_local_data("dois museus em coimbra").await;
    assert_eq!(
        names(&results),
        vec![
            "Museu Nacional Machado de Castro",
            "Museu da Ciência da Universidade de Coimbra",
        ]
    );

    let results = search.search_local_data("one castle").await;
    assert_eq!(names(&results), vec!["Castelo de Penela"]);
}

#[tokio::test]
async fn test_proximity_words_are_not_keywords() {
    let results = search_from_lousa().search_local_data("mondego nearby").await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "Trilho do Mondego");
    assert!(results.iter().all(|r| r.distance.is_some()));
}

#[tokio::test]
async fn test_keyword_mode() {
    let results = search_without_position().search_local_data("mondego").await;

    assert_eq!(
        names(&results),
        vec!["Trilho do Mondego", "Miradouro do Vale do Mondego"]
    );
}

#[tokio::test]
async fn test_duplicates_keep_first_occurrence() {
    let results = search_without_position()
        .search_local_data("castelos, castelos em penela")
        .await;

    assert_eq!(names(&results), vec!["Castelo de Penela", "Castelo da Lousã"]);
    assert_eq!(results[0].query_context, "castelos");
}

#[tokio::test]
async fn test_default_cap_per_part() {
    let results = search_without_position()
        .search_local_data("miradouros e restaurantes")
        .await;

    assert_eq!(results.len(), 5);

    let capped = LocalSearch::new(catalog(), Arc::new(UnavailablePositionProvider::default()))
        .with_default_cap(1)
        .search_local_data("miradouros e restaurantes")
        .await;
    assert_eq!(
        names(&capped),
        vec!["Miradouro do Trevim", "Restaurante Zé Manel dos Ossos"]
    );
}

#[tokio::test]
async fn test_nothing_to_match() {
    let search = search_without_position();
    assert!(search.search_local_data("").await.is_empty());
    assert!(search.search_local_data("e então").await.is_empty());
    assert!(search.search_local_data("olá").await.is_empty());
}

#[test]
fn test_browse_special_program() {
    let catalog = catalog();
    let filter = PoiFilter::all().with_categories([]).moeda_id_only(true);

    let pois = catalog.filter(&filter);
    assert_eq!(
        pois.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec![
            "Museu Nacional Machado de Castro",
            "Castelo de Penela",
            "Praia Fluvial de Avô",
        ]
    );
}

#[tokio::test]
async fn test_chat_session() {
    let search = Arc::new(search_from_lousa());
    let limiter = RateLimiter::from_config(&GuiaConfig::default());
    let orchestrator = Orchestrator::new(search, None, limiter);

    let reply = orchestrator
        .process_message("castelos perto de mim")
        .await
        .unwrap();

    assert!(reply.content.starts_with("Locais encontrados:"));
    assert!(reply.content.contains("1. Castelo da Lousã"));
    assert!(reply.content.contains("Distância:"));

    let messages = orchestrator.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].content, GREETING);
    assert_eq!(messages[1].role, Role::User);
}
