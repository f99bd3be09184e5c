//! HTTP API server.
//!
//! Exposes the interactive session over REST. Every client creates its own
//! session; sessions are held in memory and never shared.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::controller::InteractionController;
use crate::session::{Command, Notice, SessionState, SessionStore, Stage};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use uuid::Uuid;

/// Shared application state.
struct AppState {
    controller: InteractionController,
    sessions: SessionStore,
}

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Generate, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'vidnotes doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let controller = InteractionController::from_settings(&settings)?;

    let idle_timeout = settings.session.idle_timeout_seconds;
    let state = Arc::new(AppState {
        controller,
        sessions: SessionStore::new(chrono::Duration::seconds(idle_timeout as i64)),
    });

    // Sweep abandoned sessions even when no new ones are being created.
    let sweeper = state.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(idle_timeout.clamp(1, 60)));
        loop {
            ticker.tick().await;
            sweeper.sessions.evict_idle();
        }
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/url", post(submit_url))
        .route("/sessions/{id}/notes", post(request_notes))
        .route("/sessions/{id}/fact-check", post(request_fact_check))
        .route("/sessions/{id}/ask", post(ask))
        .layer(cors)
        .with_state(state);

    let host = host.unwrap_or(settings.server.host);
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("vidnotes API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET    /health");
    Output::kv("New session", "POST   /sessions");
    Output::kv("Get session", "GET    /sessions/:id");
    Output::kv("End session", "DELETE /sessions/:id");
    Output::kv("Submit URL", "POST   /sessions/:id/url");
    Output::kv("Notes", "POST   /sessions/:id/notes");
    Output::kv("Fact check", "POST   /sessions/:id/fact-check");
    Output::kv("Ask", "POST   /sessions/:id/ask");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct UrlRequest {
    url: String,
}

#[derive(Deserialize)]
struct AskRequest {
    #[serde(default)]
    question: String,
}

#[derive(Serialize)]
struct CreatedResponse {
    id: Uuid,
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct SessionResponse {
    id: Uuid,
    stage: Stage,
    state: SessionState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notices: Vec<Notice>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn not_found(id: &Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Session not found: {}", id),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn create_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let handle = state.sessions.create();
    info!("Created session {}", handle.id);
    (
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: handle.id,
            created_at: handle.created_at,
        }),
    )
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let Some(handle) = state.sessions.get(&id) else {
        return not_found(&id);
    };
    let session = handle.state.lock().await.clone();
    Json(SessionResponse {
        id,
        stage: session.stage(),
        state: session,
        notices: Vec::new(),
    })
    .into_response()
}

async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if state.sessions.remove(&id) {
        info!("Ended session {}", id);
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(&id)
    }
}

/// Run one command against a session, holding its lock throughout.
async fn run_command(state: &AppState, id: Uuid, command: Command) -> axum::response::Response {
    let Some(handle) = state.sessions.get(&id) else {
        return not_found(&id);
    };

    let mut session = handle.state.lock().await;
    let notices = state.controller.apply(&mut session, command).await;
    handle.touch();

    Json(SessionResponse {
        id,
        stage: session.stage(),
        state: session.clone(),
        notices,
    })
    .into_response()
}

async fn submit_url(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UrlRequest>,
) -> impl IntoResponse {
    run_command(&state, id, Command::SubmitUrl(req.url)).await
}

async fn request_notes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    run_command(&state, id, Command::RequestNotes).await
}

async fn request_fact_check(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    run_command(&state, id, Command::RequestFactCheck).await
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<AskRequest>,
) -> impl IntoResponse {
    run_command(&state, id, Command::Ask(req.question)).await
}
