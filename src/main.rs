use anyhow::Context;
use shelf_app::App;
use shelf_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load shelf settings")?;
    shelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "shelf-app bootstrap starting"
    );

    let app = App::prepare(settings).await?;

    tracing::info!("shelf-app bootstrap complete");
    app.run(shelf_app::shutdown_signal()).await
}
