mod cli;
mod demo;

use std::process::ExitCode;

use easyadmin_bridge::Window;
use easyadmin_client::CallProxy;
use easyadmin_config::EasyAdminConfig;
use easyadmin_host::Dispatcher;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVE: &str = "easyadmin=info";

fn load_config(args: &cli::Args) -> Result<EasyAdminConfig, String> {
    match &args.config {
        Some(path) => {
            tracing::info!("Using config override: {}", path.display());
            easyadmin_config::load_from_path(path).map_err(|e| e.to_string())
        }
        None => Ok(easyadmin_config::load_config().unwrap_or_else(|e| {
            tracing::warn!("Config load failed, using defaults: {e}");
            EasyAdminConfig::default()
        })),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or(DEFAULT_LOG_DIRECTIVE);
    let directive: Result<Directive, _> = log_directive
        .parse()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse());
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("EasyAdmin v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.print_config {
        println!("{}", easyadmin_config::config_to_json(&config));
        return ExitCode::SUCCESS;
    }

    let call_args = match args.call_args() {
        Ok(call_args) => call_args,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let host = Window::new(config.host.origin.clone());
    let (frame, client) = host.embed(config.client.origin.clone());
    let registry = demo::registry(!args.no_latency);
    tracing::info!("Registered operations: {}", registry.names().join(", "));
    let server = Dispatcher::new(&config.host, frame, registry).spawn(host);

    let result = match CallProxy::connect(&config.client, client) {
        Ok(proxy) => proxy.invoke(&args.call, call_args).await,
        Err(e) => Err(e),
    };
    server.abort();

    match result {
        Ok(value) => {
            let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}: {}", e.name(), e.message());
            ExitCode::FAILURE
        }
    }
}
