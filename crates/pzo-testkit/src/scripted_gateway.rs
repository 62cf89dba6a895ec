//! Deterministic in-memory [`OrderGateway`].
//!
//! Replies are consumed from a script in FIFO order; once the script is
//! exhausted every call is a transport fault. Each submitted draft is
//! recorded so tests can assert exactly what left the form.

use std::collections::VecDeque;
use std::sync::Mutex;

use pzo_form::{GatewayError, OrderGateway, Outcome};
use pzo_schemas::OrderDraft;

#[derive(Debug, Default)]
pub struct ScriptedGateway {
    script: Mutex<VecDeque<Result<Outcome, GatewayError>>>,
    submitted: Mutex<Vec<OrderDraft>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply (builder style).
    pub fn then(self, reply: Result<Outcome, GatewayError>) -> Self {
        self.push(reply);
        self
    }

    pub fn then_success(self, message: &str) -> Self {
        self.then(Ok(Outcome::success(message)))
    }

    pub fn then_failure(self, message: &str) -> Self {
        self.then(Ok(Outcome::failure(message)))
    }

    pub fn push(&self, reply: Result<Outcome, GatewayError>) {
        lock(&self.script).push_back(reply);
    }

    pub fn submitted(&self) -> Vec<OrderDraft> {
        lock(&self.submitted).clone()
    }

    pub fn calls(&self) -> usize {
        lock(&self.submitted).len()
    }
}

// A poisoned lock only means another test thread panicked mid-push; the
// data is still a plain Vec/VecDeque.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait::async_trait]
impl OrderGateway for ScriptedGateway {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn submit(&self, draft: &OrderDraft) -> Result<Outcome, GatewayError> {
        lock(&self.submitted).push(draft.clone());
        lock(&self.script).pop_front().unwrap_or_else(|| {
            Err(GatewayError::Transport(
                "scripted gateway: no reply queued".to_string(),
            ))
        })
    }
}
