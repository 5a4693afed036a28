use spyglass::app::DashboardApp;
use spyglass::config::Settings;
use spyglass::error::AppError;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_logging();
    let settings = Settings::load()?;
    info!("Starting spyglass {}", env!("CARGO_PKG_VERSION"));
    DashboardApp::start_gui(&settings)
}
