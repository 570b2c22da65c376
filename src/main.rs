use std::fs::File;
use std::sync::Mutex;

use clap::Parser;
use mcq_quiz::{Quiz, Settings};
use tracing_subscriber::EnvFilter;

fn init_logging(settings: &Settings) -> std::io::Result<()> {
    // The UI owns the terminal, so logs only go somewhere when asked to.
    let Some(path) = &settings.log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() {
    let settings = Settings::parse();

    if let Err(e) = init_logging(&settings) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    let quiz = match Quiz::new(settings) {
        Ok(quiz) => quiz,
        Err(e) => {
            eprintln!("Failed to start quiz: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = quiz.run().await {
        tracing::error!(error = %e, "quiz exited with an error");
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
