use tracing::info;
use tracing_subscriber::EnvFilter;

use tranquil_run::app::App;
use tranquil_run::constants::LOOP_TIME;

/// The main entry point of the application.
///
/// This function initializes logging, SDL, the window, the game state, and
/// then enters the main game loop.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Could not create app");
            std::process::exit(1);
        }
    };

    info!(loop_time = ?LOOP_TIME, "Starting game loop");

    loop {
        if !app.run() {
            break;
        }
    }

    info!("Game loop ended");
}
