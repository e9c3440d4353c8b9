use fasting_tracker::{resolve_base_url, ApiClient, App};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let mut api = ApiClient::new(resolve_base_url());
    if let Some(page_size) = env::var("FASTING_PAGE_SIZE")
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
    {
        api = api.with_page_size(page_size);
    }

    info!("using api at {}", api.base_url());

    let mut app = App::new(api);
    app.run().await?;

    Ok(())
}
