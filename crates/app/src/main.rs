//! EduLog - activity notes for teachers
//!
//! Lists classes from a spreadsheet web app, keeps short per-student activity
//! notes locally, optionally polishes them through a chat-completion relay,
//! and mirrors new notes back to the sheet.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod shell;
mod state;
mod toast;
mod viewmodel;

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting EduLog");

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = match state::AppState::new() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(data_dir = %app_state.data_dir().display(), "Data directory");

    let mut controller = match viewmodel::Controller::new(app_state.db.clone(), &app_state.config) {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!("Failed to load local data: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    runtime.block_on(shell::run(&mut controller, stdin));
}
