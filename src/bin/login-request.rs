use std::io;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use login_request::observability::metrics::Metrics;
use login_request::runner::{report_failure, RequestLoop};
use login_request::utils::config_loader;
use login_request::utils::logging::{self, LogLevel};
use login_request::{Credentials, ResponseDecoder, TokenManager, UnknownPagePolicy};
use reqwest::Client;
use tracing::{info, info_span};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL to fetch
    #[arg(short, long)]
    url: String,
    /// Password to use to get token for the API calls
    #[arg(short, long, env = "PASSWORD", hide_env_values = true)]
    password: String,
    /// Number of requests
    #[arg(short, long, default_value_t = 1)]
    count: u32,
    #[arg(long, env = "CONFIG")]
    config: Option<String>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// Treat an unrecognized page as nothing to render instead of an error
    #[arg(long)]
    allow_unknown_page: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        report_failure(&e, tracing::dispatcher::has_been_set(), &mut io::stderr());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // -------------------------------
    // 1. Read args and config
    // -------------------------------

    let args = Args::parse();
    let client_config = config_loader::run(args.config.as_deref())?;
    logging::run(&client_config, args.log_level)?;

    if args.password.is_empty() {
        bail!("Please, provide password. Try add -h flag");
    }

    // -------------------------------
    // 2. Create request client and components
    // -------------------------------

    let settings = &client_config.settings;
    let client = Client::builder()
        .timeout(Duration::from_millis(settings.http.timeout_ms))
        .build()?;
    let metrics = Metrics::new();

    let unknown_page = if args.allow_unknown_page {
        UnknownPagePolicy::Ignore
    } else {
        settings.decoder.unknown_page
    };

    let manager = TokenManager::new(client.clone(), args.url.as_str(), Credentials::new(args.password))
        .with_span(info_span!("token_manager", url = %args.url))
        .with_metrics(metrics.clone());
    let decoder = ResponseDecoder::new(client)
        .with_unknown_page(unknown_page)
        .with_span(info_span!("response_decoder", url = %args.url))
        .with_metrics(metrics.clone());

    // -------------------------------
    // 3. Run login + fetch + render loop
    // -------------------------------

    info!(count = args.count, "starting requests");
    let request_loop = RequestLoop {
        manager: &manager,
        decoder: &decoder,
        url: &args.url,
    };
    let result = request_loop.run(args.count, &mut io::stdout().lock()).await;

    if settings.metrics.is_enabled {
        eprint!("{}", metrics.render());
    }

    let rendered = result?;
    info!(rendered, "done");
    Ok(())
}
