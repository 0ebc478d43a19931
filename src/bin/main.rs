use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "cine-server")]
#[command(about = "Movie listing proxy for TMDB and OMDb", long_about = None)]
struct Args {
    /// Optional YAML config file; PORT, TMDB_API_KEY and OMDB_API_KEY override it.
    #[arg(short, long)]
    config: Option<String>,

    #[arg(short, long)]
    debug: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let default_filter = if args.debug {
        "cine_proxy=debug,tower_http=debug"
    } else {
        "cine_proxy=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match args.log_format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }

    let opts = cine_proxy::RunOptions {
        config_path: args.config,
        debug_logs: args.debug,
    };

    if let Err(e) = cine_proxy::run(opts).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
