//! pzo-testkit
//!
//! Test doubles for the order endpoint:
//! - [`StubServer`] / [`build_router`] : axum stand-in for `POST /api/order`
//! - [`ScriptedGateway`] : in-memory gateway with queued replies
//!
//! Scenario tests covering the whole form → gateway → outcome loop live
//! under `tests/`.

pub mod scripted_gateway;
pub mod stub_server;

pub use scripted_gateway::ScriptedGateway;
pub use stub_server::{build_router, confirmation, StubMode, StubServer, StubState, ORDER_PATH};
