//! Order form controller.
//!
//! # Design
//!
//! Owns the draft, the derived state (field errors, submit-enabled flag) and
//! the last outcome for one form instance. Every input event is applied
//! synchronously and followed by re-derivation, so no stale derived state is
//! observable between an event and the next read.
//!
//! # State diagram
//!
//! ```text
//!                begin_submit (submit enabled)
//!    Editing ───────────────────────────────► Submitting
//!       ▲                                        │
//!       │   complete_submit (response or fault)  │
//!       └────────────────────────────────────────┘
//!
//!    begin_submit while disabled   → SubmitRejected::Disabled, no transition
//!    begin_submit while Submitting → SubmitRejected::InFlight, no transition
//! ```
//!
//! Edits are accepted in both phases. A response (success or failure)
//! always resets the draft, which also discards edits made while the
//! request was outstanding.
//!
//! A submission that will never complete (ticket abandoned, `submit` future
//! dropped) returns the form to `Editing` with the draft untouched.

use pzo_schemas::OrderDraft;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use crate::gateway::{GatewayError, OrderGateway, Outcome};
use crate::store::FieldStore;
use crate::validate::{validate_all, validate_field, FieldErrors, FieldName, UnknownField};

// Tickets carry the id of the form that issued them.
static NEXT_FORM_ID: AtomicU64 = AtomicU64::new(1);

// ---------------------------------------------------------------------------
// FormPhase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormPhase {
    /// Initial phase; also the phase after every completed submission.
    Editing,
    /// A submission ticket is outstanding.
    Submitting,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why `begin_submit` refused to start a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// The draft does not satisfy the schema.
    Disabled,
    /// Another submission has not completed yet.
    InFlight,
}

impl fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRejected::Disabled => {
                write!(f, "submit disabled: order draft does not pass validation")
            }
            SubmitRejected::InFlight => {
                write!(f, "submit rejected: a submission is already in flight")
            }
        }
    }
}

impl std::error::Error for SubmitRejected {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    Rejected(SubmitRejected),
    /// The ticket is not the outstanding submission of this form.
    StaleTicket { attempt: u64, in_flight: Option<u64> },
    /// The gateway produced no `{ message }` response.
    Gateway(GatewayError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Rejected(r) => write!(f, "{r}"),
            SubmitError::StaleTicket { attempt, in_flight } => write!(
                f,
                "stale submission ticket: attempt={attempt} in_flight={in_flight:?}"
            ),
            SubmitError::Gateway(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Rejected(r) => Some(r),
            SubmitError::Gateway(e) => Some(e),
            SubmitError::StaleTicket { .. } => None,
        }
    }
}

impl From<SubmitRejected> for SubmitError {
    fn from(r: SubmitRejected) -> Self {
        SubmitError::Rejected(r)
    }
}

// ---------------------------------------------------------------------------
// SubmissionTicket
// ---------------------------------------------------------------------------

/// Proof that a submission was started by [`OrderFormController::begin_submit`].
///
/// Carries the draft snapshot to send. Fields are private so a ticket can
/// only come from a controller, and it is only accepted by the controller
/// that issued it. Consumed by `complete_submit` or `abandon_submit`.
#[derive(Debug)]
pub struct SubmissionTicket {
    form: u64,
    attempt: u64,
    draft: OrderDraft,
}

impl SubmissionTicket {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// The draft as it was when the submission started.
    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }
}

// ---------------------------------------------------------------------------
// OrderFormController
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct OrderFormController {
    id: u64,
    store: FieldStore,
    errors: FieldErrors,
    submit_enabled: bool,
    outcome: Option<Outcome>,
    phase: FormPhase,
    in_flight: Option<u64>,
    attempts: u64,
}

impl Default for OrderFormController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderFormController {
    pub fn new() -> Self {
        let store = FieldStore::new();
        let submit_enabled = validate_all(store.draft());
        Self {
            id: NEXT_FORM_ID.fetch_add(1, Ordering::Relaxed),
            store,
            errors: FieldErrors::default(),
            submit_enabled,
            outcome: None,
            phase: FormPhase::Editing,
            in_flight: None,
            attempts: 0,
        }
    }

    // -- Read side ----------------------------------------------------------

    pub fn draft(&self) -> &OrderDraft {
        self.store.draft()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    // -- Input events -------------------------------------------------------

    /// Field change event for `fullName` or `size`.
    pub fn set_field(&mut self, field: FieldName, value: &str) {
        self.store.set_field(field, value);
        self.errors.set(field, validate_field(field, value));
        self.rederive();
    }

    /// Field change event addressed by its form name.
    pub fn set_named_field(&mut self, name: &str, value: &str) -> Result<(), UnknownField> {
        let field = FieldName::parse(name)?;
        self.set_field(field, value);
        Ok(())
    }

    /// Checkbox event. Never touches field errors.
    pub fn toggle_topping(&mut self, id: &str, selected: bool) {
        self.store.toggle_topping(id, selected);
        self.rederive();
    }

    fn rederive(&mut self) {
        self.submit_enabled = validate_all(self.store.draft());
    }

    // -- Submission ---------------------------------------------------------

    /// Start a submission: `Editing` → `Submitting`.
    ///
    /// # Errors
    /// [`SubmitRejected::InFlight`] while another ticket is outstanding,
    /// [`SubmitRejected::Disabled`] while the draft fails validation. Neither
    /// changes any state.
    pub fn begin_submit(&mut self) -> Result<SubmissionTicket, SubmitRejected> {
        if self.phase == FormPhase::Submitting {
            debug!(in_flight = ?self.in_flight, "order form: submit rejected, in flight");
            return Err(SubmitRejected::InFlight);
        }
        if !self.submit_enabled {
            debug!("order form: submit rejected, draft invalid");
            return Err(SubmitRejected::Disabled);
        }

        self.attempts += 1;
        self.in_flight = Some(self.attempts);
        self.phase = FormPhase::Submitting;
        debug!(
            attempt = self.attempts,
            size = %self.store.draft().size,
            toppings = self.store.draft().toppings.len(),
            "order form: submitting"
        );

        Ok(SubmissionTicket {
            form: self.id,
            attempt: self.attempts,
            draft: self.store.draft().clone(),
        })
    }

    /// Finish a submission: `Submitting` → `Editing`.
    ///
    /// On a response the outcome replaces the previous one and the draft,
    /// field errors and submit flag return to their initial values. On a
    /// gateway fault draft and outcome are left as they were and the fault is
    /// returned to the caller.
    ///
    /// # Errors
    /// [`SubmitError::StaleTicket`] if `ticket` is not the outstanding
    /// submission of this form (no state change), [`SubmitError::Gateway`]
    /// on a fault.
    pub fn complete_submit(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<Outcome, GatewayError>,
    ) -> Result<Outcome, SubmitError> {
        self.check_ticket(&ticket)?;

        self.in_flight = None;
        self.phase = FormPhase::Editing;

        match result {
            Ok(outcome) => {
                debug!(
                    attempt = ticket.attempt,
                    kind = outcome.kind.as_str(),
                    "order form: submission completed"
                );
                self.outcome = Some(outcome.clone());
                self.store.reset();
                self.errors = FieldErrors::default();
                self.rederive();
                Ok(outcome)
            }
            Err(e) => {
                warn!(attempt = ticket.attempt, error = %e, "order form: submission fault");
                Err(SubmitError::Gateway(e))
            }
        }
    }

    /// Give up on a submission without a result: `Submitting` → `Editing`.
    ///
    /// Draft, field errors and outcome are left as they were.
    ///
    /// # Errors
    /// [`SubmitError::StaleTicket`] if `ticket` is not the outstanding
    /// submission of this form (no state change).
    pub fn abandon_submit(&mut self, ticket: SubmissionTicket) -> Result<(), SubmitError> {
        self.check_ticket(&ticket)?;
        self.release(ticket.attempt, "submission abandoned");
        Ok(())
    }

    /// `begin_submit`, one gateway round-trip, `complete_submit`.
    ///
    /// Dropping the returned future before the gateway answers behaves like
    /// `abandon_submit`.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<Outcome, SubmitError>
    where
        G: OrderGateway + ?Sized,
    {
        let ticket = self.begin_submit()?;
        let mut pending = PendingSubmit {
            form: self,
            attempt: ticket.attempt,
            armed: true,
        };
        let result = gateway.submit(ticket.draft()).await;
        pending.armed = false;
        pending.form.complete_submit(ticket, result)
    }

    fn check_ticket(&self, ticket: &SubmissionTicket) -> Result<(), SubmitError> {
        if ticket.form == self.id && self.in_flight == Some(ticket.attempt) {
            return Ok(());
        }
        warn!(
            attempt = ticket.attempt,
            in_flight = ?self.in_flight,
            foreign = ticket.form != self.id,
            "order form: ignoring stale submission ticket"
        );
        Err(SubmitError::StaleTicket {
            attempt: ticket.attempt,
            in_flight: self.in_flight,
        })
    }

    fn release(&mut self, attempt: u64, reason: &'static str) {
        if self.in_flight != Some(attempt) {
            return;
        }
        self.in_flight = None;
        self.phase = FormPhase::Editing;
        warn!(attempt, reason, "order form: back to editing without a response");
    }
}

/// Held across the gateway await in [`OrderFormController::submit`].
struct PendingSubmit<'a> {
    form: &'a mut OrderFormController,
    attempt: u64,
    armed: bool,
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.form.release(self.attempt, "submit future dropped");
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
