use tracing_subscriber::{
    EnvFilter, Layer, filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

mod app;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env when present.
    dotenvy::dotenv().ok();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,tabletalk=info"));

    // Engine events go through the engine's own layer; everything else
    // through a plain one.
    let app_layer = fmt::layer().with_target(false).with_filter(filter_fn(|meta| {
        !meta.target().starts_with(model_engine::telemetry::TARGET_PREFIX)
    }));

    tracing_subscriber::registry()
        .with(filter)
        .with(app_layer)
        .with(model_engine::telemetry::layer())
        .init();

    app::run().await
}
