use std::process::ExitCode;

use blog_api::{
    logging::init_cli_tracing,
    stack::{
        identity::{HostedUi, GOOGLE_PROVIDER},
        BlogApiStack, StackConfig,
    },
};
use tracing::{error, info};

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_cli_tracing();

    let config = match StackConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let template = BlogApiStack::new(&config).to_template();
    match serde_json::to_string_pretty(&template) {
        Ok(rendered) => println!("{}", rendered),
        Err(err) => {
            error!("Failed to render template: {}", err);
            return ExitCode::FAILURE;
        }
    }

    if let Some(client_id) = &config.oauth_client_id {
        let ui = HostedUi::new(&config);
        let provider = config.google.as_ref().map(|_| GOOGLE_PROVIDER);
        info!(
            "Hosted login: {}",
            ui.authorize_url(client_id, &config.callback_url, provider)
        );
        info!("Hosted logout: {}", ui.logout_url(client_id, &config.logout_url));
    }

    ExitCode::SUCCESS
}
