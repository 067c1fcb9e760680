use chainview_ops_rs::config::Settings;
use chainview_ops_rs::context::OpsContext;
use chainview_ops_rs::feed::SimulatedDataSource;
use chainview_ops_rs::persistence::preferences::PreferenceStore;
use chainview_ops_rs::presence::SimulatedPresenceSource;
use chainview_ops_rs::runtime::OpsRuntime;
use chainview_ops_rs::seed;
use chainview_ops_rs::state::OpsState;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    info!("╔═══════════════════════════════════════════════════════════════╗");
    info!("║               CHAINVIEW OPS RS - Simulated Feed               ║");
    info!("║               Supply Chain Operations Engine                  ║");
    info!("╚═══════════════════════════════════════════════════════════════╝");

    dotenv::dotenv().ok();

    let settings = Settings::new().unwrap_or_else(|e| {
        error!("Failed to load settings, using defaults: {}", e);
        Settings::default()
    });

    let feed_config = settings.feed();
    let presence_config = settings.presence();

    // Preferences persist across runs; everything else is in-memory only.
    let prefs = PreferenceStore::open(settings.store().path())?;
    let app_settings = prefs.load_app_settings()?;
    info!(
        auto_refresh = app_settings.auto_refresh,
        alert_threshold = ?app_settings.alert_threshold,
        "App settings loaded"
    );

    let ctx = Arc::new(OpsContext::new_system());
    let state = OpsState::new(ctx.clone(), feed_config.max_alerts(), seed::demo(&ctx));

    let data_source = Arc::new(SimulatedDataSource::new(ctx.rng.clone(), &feed_config));
    let presence_source = Arc::new(SimulatedPresenceSource::new(
        ctx.rng.clone(),
        &presence_config,
    ));

    let mut runtime = OpsRuntime::new(
        state,
        data_source,
        presence_source,
        feed_config,
        presence_config,
    );
    let mut events = runtime.subscribe();
    runtime.start();
    info!("✅ Simulators running");

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(event) => info!(event = ?event, "Feed event"),
                    Err(e) => {
                        error!("Event stream closed: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested");
                break;
            }
        }
    }

    runtime.shutdown();
    Ok(())
}
