use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::advisor::{Advice, AdvisorConfig, Situation, advise};
use crate::cards::parse_cards;
use crate::equity::{DEFAULT_SEED, DEFAULT_TRIALS};
use crate::ev::Action;
use crate::ledger::{HandLogEntry, SessionLedger};
use crate::opponent::default_fold_prob;

#[derive(Clone)]
struct AppState {
    ledgers: Arc<RwLock<HashMap<Uuid, Arc<Mutex<SessionLedger>>>>>,
}

impl AppState {
    fn new() -> Self {
        Self {
            ledgers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn insert_ledger(&self, ledger: SessionLedger) -> (Uuid, Arc<Mutex<SessionLedger>>) {
        let id = Uuid::new_v4();
        let entry = Arc::new(Mutex::new(ledger));
        self.ledgers.write().insert(id, entry.clone());
        (id, entry)
    }

    fn get_ledger(&self, id: &Uuid) -> Option<Arc<Mutex<SessionLedger>>> {
        self.ledgers.read().get(id).cloned()
    }
}

#[derive(Debug, Deserialize)]
struct AdviceRequest {
    hero: String,
    #[serde(default)]
    board: String,
    pot: f32,
    call_amount: f32,
    raise_amount: f32,
    fold_prob: Option<f32>,
    trials: Option<u32>,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct StartSessionRequest {
    starting_bankroll: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct LogHandRequest {
    pot: f32,
    action: Action,
    ev: f32,
    realized_result: f32,
}

#[derive(Debug, Serialize)]
struct LedgerView {
    session_id: Uuid,
    bankroll: f32,
    hands: Vec<HandLogEntry>,
}

impl LedgerView {
    fn of(session_id: Uuid, ledger: &SessionLedger) -> Self {
        Self {
            session_id,
            bankroll: ledger.bankroll(),
            hands: ledger.history().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("session not found")]
    NotFound,
    #[error("{0}")]
    Invalid(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub async fn serve(addr: SocketAddr) -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .try_init();

    let state = AppState::new();
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "advisor listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/advice", post(compute_advice))
        .route("/sessions", post(start_session))
        .route("/sessions/:id", get(fetch_session))
        .route("/sessions/:id/hands", post(log_hand));

    Router::new()
        .route("/healthz", get(health))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn router() -> Router {
    build_router(AppState::new())
}

async fn health() -> &'static str {
    "ok"
}

async fn compute_advice(
    State(_state): State<AppState>,
    Json(req): Json<AdviceRequest>,
) -> Result<Json<Advice>, ApiError> {
    let hero = parse_cards(&req.hero).map_err(|err| ApiError::Invalid(err.to_string()))?;
    let board = parse_cards(&req.board).map_err(|err| ApiError::Invalid(err.to_string()))?;

    let situation = Situation {
        hero,
        board,
        pot: req.pot,
        call_amount: req.call_amount,
        raise_amount: req.raise_amount,
        fold_prob: req.fold_prob.unwrap_or_else(default_fold_prob),
    };
    let config = AdvisorConfig {
        trials: req.trials.unwrap_or(DEFAULT_TRIALS),
        seed: req.seed.unwrap_or(DEFAULT_SEED),
    };

    let advice = advise(&situation, &config).map_err(|err| ApiError::Invalid(err.to_string()))?;
    Ok(Json(advice))
}

async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> Result<Json<LedgerView>, ApiError> {
    let ledger = SessionLedger::new(req.starting_bankroll.unwrap_or(0.0));
    let (id, entry) = state.insert_ledger(ledger);
    let guard = entry.lock();
    Ok(Json(LedgerView::of(id, &guard)))
}

async fn fetch_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LedgerView>, ApiError> {
    let ledger_arc = state.get_ledger(&id).ok_or(ApiError::NotFound)?;
    let guard = ledger_arc.lock();
    Ok(Json(LedgerView::of(id, &guard)))
}

async fn log_hand(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<LogHandRequest>,
) -> Result<Json<LedgerView>, ApiError> {
    let ledger_arc = state.get_ledger(&id).ok_or(ApiError::NotFound)?;
    let mut guard = ledger_arc.lock();
    guard.add_hand(req.pot, req.action, req.ev, req.realized_result);
    Ok(Json(LedgerView::of(id, &guard)))
}
