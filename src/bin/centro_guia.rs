

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use centro_guia::geo::{FixedPositionProvider, UnavailablePositionProvider};
use centro_guia::{Catalog, GuiaConfig, LocalSearch, Position, PositionProvider};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;
    let mut words: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--lat" => {
                if i + 1 < args.len() {
                    latitude = Some(args[i + 1].parse()?);
                    i += 1;
                }
            }
            "--lon" => {
                if i + 1 < args.len() {
                    longitude = Some(args[i + 1].parse()?);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            word => words.push(word.to_string()),
        }
        i += 1;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let query = words.join(" ");
    if query.trim().is_empty() {
        print_help();
        std::process::exit(1);
    }

    let config = GuiaConfig::load(config_path.as_deref())?;
    let catalog = Arc::new(Catalog::from_path(&config.catalog_path)?);

    let provider: Arc<dyn PositionProvider> = match (latitude, longitude) {
        (Some(lat), Some(lon)) => Arc::new(FixedPositionProvider::new(Position::new(lat, lon))),
        (None, None) => match config.home_position() {
            Some(home) => Arc::new(FixedPositionProvider::new(home)),
            None => Arc::new(UnavailablePositionProvider::default()),
        },
        _ => anyhow::bail!("--lat and --lon must be given together"),
    };

    let search = LocalSearch::from_config(catalog, provider, &config);
    let results = search.search_local_data(&query).await;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

fn print_help() {
    println!(r#"
Centro Guia local search

USAGE:
    centro-guia [OPTIONS] <QUERY>...

OPTIONS:
    -c, --config <FILE>     Config file (default: ./centro-guia.{{toml,json,yaml}} if present)
    --lat <DEGREES>         Caller latitude for "perto de mim" requests
    --lon <DEGREES>         Caller longitude for "perto de mim" requests
    -h, --help              Print this help

EXAMPLES:
    centro-guia restaurantes em coimbra
    centro-guia "3 museus perto de mim" --lat 40.2033 --lon -8.4103
    centro-guia "castelos, depois aldeias do xisto na lousã"

ENVIRONMENT:
    CENTRO_GUIA_CATALOG_PATH         Catalog JSON file (default: data/pois.json)
    CENTRO_GUIA_DEFAULT_RESULT_CAP   Results per part without a quantity (default: 5)
    CENTRO_GUIA_HOME_LATITUDE        Fallback caller latitude
    CENTRO_GUIA_HOME_LONGITUDE       Fallback caller longitude
    RUST_LOG                         Log filter (default: warn)
"#);
}
