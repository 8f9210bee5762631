pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod notify;
pub mod routes;
pub mod scoring;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::engine::{ActionExecutor, WorkflowEngine};
use crate::notify::chat::ChatWebhook;
use crate::notify::email::SmtpMailer;
use crate::notify::{ChannelNotifier, Notifier};
use crate::scoring::{CandidateScorer, KeywordScorer};
use crate::state::{AppState, SharedState};
use crate::store::Store;

/// Build the default notifier from config. Transports that fail to
/// initialise are logged and left out.
pub fn build_notifier(config: &Config) -> ChannelNotifier {
    let mailer = config.smtp.as_ref().and_then(|smtp| {
        match SmtpMailer::new(smtp, config.notify_timeout_secs) {
            Ok(mailer) => {
                tracing::info!("SMTP configured");
                Some(mailer)
            }
            Err(e) => {
                tracing::warn!("SMTP not available: {e}");
                None
            }
        }
    });

    let chat = config.slack_webhook_url.as_ref().and_then(|url| {
        match ChatWebhook::new(url.clone(), config.notify_timeout_secs) {
            Ok(chat) => {
                tracing::info!("Chat webhook configured");
                Some(chat)
            }
            Err(e) => {
                tracing::warn!("Chat webhook not available: {e}");
                None
            }
        }
    });

    ChannelNotifier::new(mailer, chat)
}

/// Wire the engine and stores over one backend, with explicit collaborators.
pub fn build_state<S: Store + 'static>(
    config: Config,
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    scorer: Option<Arc<dyn CandidateScorer>>,
) -> SharedState {
    let scorer: Arc<dyn CandidateScorer> = match scorer {
        Some(scorer) => scorer,
        None => Arc::new(KeywordScorer::new(store.clone(), store.clone())),
    };
    let executor = ActionExecutor::new(store.clone(), notifier, scorer);
    let engine = WorkflowEngine::new(store.clone(), store.clone(), executor);

    Arc::new(AppState {
        config,
        workflows: store.clone(),
        entities: store.clone(),
        tags: store,
        engine,
    })
}

pub fn build_app(state: SharedState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
