//! pzo-form
//!
//! Order form core: field store, validator, controller state machine and the
//! gateway boundary. No I/O; the HTTP adapter lives in `pzo-http`.
//!
//! Flow for every input event:
//!
//! ```text
//! event ─► FieldStore mutation ─► field error (fullName/size only)
//!                               └► submit_enabled = validate_all(draft)
//! submit ─► begin_submit ─► OrderGateway::submit ─► complete_submit ─► Outcome + reset
//! ```

mod controller;
mod gateway;
mod store;
mod validate;
pub mod view;

pub use controller::{
    FormPhase, OrderFormController, SubmissionTicket, SubmitError, SubmitRejected,
};
pub use gateway::{GatewayError, OrderGateway, Outcome, OutcomeKind};
pub use store::FieldStore;
pub use validate::{
    validate_all, validate_field, FieldErrors, FieldName, UnknownField, FULL_NAME_MAX_CHARS,
    FULL_NAME_MIN_CHARS, FULL_NAME_REQUIRED, FULL_NAME_TOO_LONG, FULL_NAME_TOO_SHORT,
    SIZE_INCORRECT, SIZE_REQUIRED,
};

// Re-exported so hosts and adapters need only one import path.
pub use pzo_schemas::{OrderDraft, Size, Topping};
