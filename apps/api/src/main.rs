mod analysis;
mod config;
mod errors;
mod extraction;
mod routes;
mod skills;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::{DocumentTextExtractor, TesseractCli};
use crate::routes::build_router;
use crate::skills::dictionary::SkillDictionary;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillGap API v{}", env!("CARGO_PKG_VERSION"));

    // Load skill dictionary
    let dictionary = match &config.skill_dictionary_path {
        Some(path) => SkillDictionary::load(path)
            .with_context(|| format!("Failed to load skill dictionary from {}", path.display()))?,
        None => SkillDictionary::builtin().context("Bundled skill dictionary is invalid")?,
    };
    info!(
        "Skill dictionary loaded: {} categories, {} skills",
        dictionary.category_count(),
        dictionary.skill_count()
    );
    let unmatchable = dictionary.unmatchable_phrases();
    if !unmatchable.is_empty() {
        warn!(
            "{} dictionary phrases can never match extracted text: {:?}",
            unmatchable.len(),
            unmatchable
        );
    }

    // Initialize extractor (OCR via pdftoppm + tesseract when installed)
    let extractor =
        DocumentTextExtractor::new(config.extraction_config(), Arc::new(TesseractCli::new()));
    if extractor.ocr_available() {
        info!(
            "OCR enabled (language: {}, zoom: {})",
            config.ocr_language, config.ocr_zoom
        );
    } else {
        warn!("OCR tools not found; image-only PDFs will yield no text");
    }

    // Build app state
    let state = AppState::new(config.clone(), dictionary, extractor);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
