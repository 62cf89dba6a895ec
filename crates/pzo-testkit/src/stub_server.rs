//! In-process stand-in for the order-creation endpoint.
//!
//! `build_router` gives the bare router for `oneshot` tests; [`StubServer`]
//! binds it to an ephemeral localhost port for end-to-end tests through the
//! real HTTP adapter. Every accepted or rejected body is recorded.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use pzo_form::{validate_field, FieldName};
use pzo_schemas::{MessageBody, OrderDraft};
use tokio::{net::TcpListener, sync::Mutex, task::JoinHandle};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const ORDER_PATH: &str = "/api/order";

// ---------------------------------------------------------------------------
// StubMode
// ---------------------------------------------------------------------------

/// How the stub answers `POST /api/order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubMode {
    /// Apply the same field rules as the form; 201 with a confirmation or
    /// 422 with the first failing field's message.
    Validate,
    /// 201 with this message, whatever the body.
    Accept(String),
    /// This status with this message, whatever the body.
    Reject { status: u16, message: String },
    /// This status with a body that is not `{ message }`.
    Garbage { status: u16 },
}

// ---------------------------------------------------------------------------
// StubState
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct StubState {
    mode: StubMode,
    received: Mutex<Vec<OrderDraft>>,
}

impl StubState {
    pub fn new(mode: StubMode) -> Self {
        Self {
            mode,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Every draft the endpoint has decoded, in arrival order.
    pub async fn received(&self) -> Vec<OrderDraft> {
        self.received.lock().await.clone()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Bare router; no middleware so tests can drive it directly.
pub fn build_router(state: Arc<StubState>) -> Router {
    Router::new()
        .route(ORDER_PATH, post(create_order))
        .with_state(state)
}

pub(crate) async fn create_order(
    State(st): State<Arc<StubState>>,
    Json(draft): Json<OrderDraft>,
) -> Response {
    st.received.lock().await.push(draft.clone());

    match &st.mode {
        StubMode::Validate => match first_field_error(&draft) {
            Some(msg) => message(StatusCode::UNPROCESSABLE_ENTITY, msg),
            None => message(StatusCode::CREATED, &confirmation(&draft)),
        },
        StubMode::Accept(msg) => message(StatusCode::CREATED, msg),
        StubMode::Reject { status, message: msg } => message(status_or_500(*status), msg),
        StubMode::Garbage { status } => {
            (status_or_500(*status), "<html>not an order response</html>").into_response()
        }
    }
}

fn message(status: StatusCode, msg: &str) -> Response {
    (status, Json(MessageBody::new(msg))).into_response()
}

fn status_or_500(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn first_field_error(draft: &OrderDraft) -> Option<&'static str> {
    validate_field(FieldName::FullName, &draft.full_name)
        .or_else(|| validate_field(FieldName::Size, &draft.size))
}

/// e.g. `Thank you for your order, Alice Smith! Your large pizza with 1 topping is on the way.`
pub fn confirmation(draft: &OrderDraft) -> String {
    let size = draft
        .parsed_size()
        .map(|s| s.label().to_ascii_lowercase())
        .unwrap_or_else(|| draft.size.clone());
    let toppings = match draft.toppings.len() {
        0 => "no toppings".to_string(),
        1 => "1 topping".to_string(),
        n => format!("{n} toppings"),
    };
    format!(
        "Thank you for your order, {}! Your {} pizza with {} is on the way.",
        draft.full_name.trim(),
        size,
        toppings
    )
}

// ---------------------------------------------------------------------------
// StubServer
// ---------------------------------------------------------------------------

/// Stub endpoint served on `127.0.0.1:<ephemeral>` until dropped.
pub struct StubServer {
    addr: SocketAddr,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn spawn(mode: StubMode) -> anyhow::Result<Self> {
        let state = Arc::new(StubState::new(mode));
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .context("stub server bind failed")?;
        let addr = listener.local_addr().context("stub server local_addr")?;

        let app = build_router(Arc::clone(&state)).layer(TraceLayer::new_for_http());
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "stub order server stopped");
            }
        });

        info!("stub order endpoint listening on http://{}", addr);
        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn order_url(&self) -> String {
        format!("{}{}", self.base_url(), ORDER_PATH)
    }

    pub async fn received(&self) -> Vec<OrderDraft> {
        self.state.received().await
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
