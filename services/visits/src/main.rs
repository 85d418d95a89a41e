use std::sync::Arc;

use tracing::info;

use magicbank_core::config::Config;
use magicbank_core::tracing::init_tracing;
use magicbank_visits::config::VisitsConfig;
use magicbank_visits::infra::mail::HttpMailNotifier;
use magicbank_visits::infra::memory::MemoryAccessCodeStore;
use magicbank_visits::infra::sweeper::spawn_expiry_sweeper;
use magicbank_visits::router::build_router;
use magicbank_visits::state::AppState;

#[tokio::main]
async fn main() {
    let config = VisitsConfig::from_env();
    init_tracing("info");

    let settings = config
        .visit_settings()
        .expect("invalid visit configuration");
    let notifier =
        HttpMailNotifier::new(config.mail_settings()).expect("failed to build mail client");

    let codes = Arc::new(MemoryAccessCodeStore::new());
    if let Some(every) = config.sweep_interval() {
        spawn_expiry_sweeper(Arc::clone(&codes), every);
        info!(every_secs = every.as_secs(), "expired-code sweeper enabled");
    }

    let state = AppState {
        codes,
        notifier,
        settings: Arc::new(settings),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("visits service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
