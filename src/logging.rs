use std::env;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,aws_config=warn,hyper=warn";

/// Installs the global subscriber. JSON lines on Lambda (CloudWatch), plain text elsewhere.
pub fn init_tracing() {
    let is_lambda = env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok();
    let json = is_lambda
        || env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if json {
        registry
            .with(fmt::layer().json().with_target(false))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()
    };

    if let Err(err) = result {
        eprintln!("tracing subscriber already installed: {}", err);
    }
}

/// Text logs on stderr, for tools whose stdout is their output.
pub fn init_cli_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();

    if let Err(err) = result {
        eprintln!("tracing subscriber already installed: {}", err);
    }
}
