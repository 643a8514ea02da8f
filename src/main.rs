use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};

use vmess2clash::interfaces::{subconverter, SubconverterConfig};
use vmess2clash::utils::HttpFetcher;
use vmess2clash::web_handlers::interfaces;
use vmess2clash::{AppState, Settings};

/// Convert a vmess subscription into a Clash configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address (e.g., 127.0.0.1 or 0.0.0.0)
    #[arg(short, long, value_name = "ADDRESS")]
    address: Option<String>,

    /// Listen port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Subscription URL to convert once instead of starting the server
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Output file path for the one-shot conversion (must be used with --url)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<String>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Check if only one of url or output is provided
    if args.url.is_some() != args.output.is_some() {
        eprintln!("Error: --url and -o/--output must be used together");
        std::process::exit(1);
    }

    let mut settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize the logger, RUST_LOG still wins
    env_logger::init_from_env(Env::default().default_filter_or(settings.log_level.clone()));

    if settings.pref_path.is_empty() {
        info!("Config file not found, using defaults and environment variables");
    } else {
        info!("Loaded settings from {}", settings.pref_path);
    }

    // Override settings with command line arguments if provided
    if let Some(address) = args.address {
        settings.listen_address = address;
    }
    if let Some(port) = args.port {
        settings.listen_port = port;
    }

    if let (Some(url), Some(output_file)) = (args.url, args.output) {
        settings.url = url;
        return convert_to_file(&settings, &output_file).await;
    }

    if let Err(e) = url::Url::parse(&settings.url) {
        warn!("Subscription URL '{}' looks invalid: {}", settings.url, e);
    }

    let listen_address = settings.listen_addr();
    info!("vmess2clash starting on {}", listen_address);
    info!("Subscription source: {}", settings.url);

    let app_state = web::Data::new(AppState::new(settings));

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(app_state.clone())
            .configure(interfaces::config::<HttpFetcher>)
            .route("/", web::get().to(|| async { "vmess2clash is running!" }))
    })
    .bind(listen_address)?
    .run()
    .await
}

/// Run one conversion and write the document to `output_file`
async fn convert_to_file(settings: &Settings, output_file: &str) -> std::io::Result<()> {
    info!(
        "Processing subscription from URL: {} to file: {}",
        settings.url, output_file
    );

    let fetcher = HttpFetcher::new(settings.fetch_timeout);
    let config = SubconverterConfig::from(settings);
    match subconverter(&config, &fetcher).await {
        Ok(result) => {
            std::fs::write(output_file, result.content)?;
            info!(
                "Successfully wrote {} proxies to {}",
                result.node_count, output_file
            );
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            std::process::exit(1);
        }
    }
}
