use tracing_subscriber::EnvFilter;

// This main function is the entry point when running `cargo run -p web-server`.
// Its only job is to initialize tracing, load the configuration, and hand
// over to the `run_server` function from the crate's library.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = configuration::load_config()?;
    web_server::run_server(config).await
}
