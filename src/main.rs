use blog_api::{config::Config, create_app, logging::init_tracing};

#[cfg(not(feature = "lambda"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = Config::init();
    let port = config.port;
    let app = create_app(config).await;

    let listener = tokio::net::TcpListener::bind(format!("[::]:{}", port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    dotenv::dotenv().ok();
    init_tracing();

    let app = create_app(Config::init()).await;
    lambda_http::run(app).await
}
