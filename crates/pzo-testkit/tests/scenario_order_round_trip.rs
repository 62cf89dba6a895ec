//! Full loop: input events → controller → HTTP gateway → stub endpoint →
//! outcome written back and draft reset.

use pzo_config::EndpointConfig;
use pzo_form::{
    view::FormView, FieldName, FormPhase, GatewayError, OrderFormController, OrderGateway,
    Outcome, OutcomeKind, SubmitError, SubmitRejected,
};
use pzo_http::HttpOrderGateway;
use pzo_schemas::default_toppings;
use pzo_testkit::{ScriptedGateway, StubMode, StubServer};

fn alice_large_green_peppers() -> OrderFormController {
    let mut f = OrderFormController::new();
    f.set_field(FieldName::FullName, "Alice Smith");
    f.set_field(FieldName::Size, "L");
    f.toggle_topping("2", true);
    f
}

#[tokio::test]
async fn success_response_sets_outcome_and_resets_draft() {
    let server = StubServer::spawn(StubMode::Accept("Order placed".to_string()))
        .await
        .unwrap();
    let gw = HttpOrderGateway::new(server.order_url());

    let mut form = alice_large_green_peppers();
    assert!(form.errors().is_clear());
    assert!(form.submit_enabled());

    let out = form.submit(&gw).await.unwrap();
    assert_eq!(out, Outcome::success("Order placed"));
    assert_eq!(form.outcome(), Some(&Outcome::success("Order placed")));
    assert!(form.draft().is_empty());
    assert!(!form.submit_enabled());
    assert_eq!(form.phase(), FormPhase::Editing);

    let received = server.received().await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].full_name, "Alice Smith");
    assert_eq!(received[0].size, "L");
    assert_eq!(
        received[0].toppings.iter().collect::<Vec<_>>(),
        vec!["2"]
    );
}

#[tokio::test]
async fn error_response_sets_failure_and_resets_draft() {
    let server = StubServer::spawn(StubMode::Reject {
        status: 500,
        message: "We are out of dough".to_string(),
    })
    .await
    .unwrap();
    let gw = HttpOrderGateway::new(server.order_url());

    let mut form = alice_large_green_peppers();
    form.submit(&gw).await.unwrap();

    let out = form.outcome().unwrap();
    assert_eq!(out.kind, OutcomeKind::Failure);
    assert_eq!(out.message, "We are out of dough");
    assert!(form.draft().is_empty());
}

#[tokio::test]
async fn failure_then_success_shows_only_latest_banner() {
    let server = StubServer::spawn(StubMode::Validate).await.unwrap();
    let endpoint = EndpointConfig {
        base_url: server.base_url(),
        ..EndpointConfig::default()
    };
    let gw = HttpOrderGateway::from_endpoint(&endpoint);

    // Untrimmed name passes the whole-draft check; the stub trims and sees "Al".
    let mut form = OrderFormController::new();
    form.set_field(FieldName::FullName, "  Al");
    form.set_field(FieldName::Size, "M");
    assert!(form.submit_enabled());
    form.submit(&gw).await.unwrap();
    assert_eq!(
        form.outcome(),
        Some(&Outcome::failure("full name must be at least 3 characters"))
    );

    form.set_field(FieldName::FullName, "Alice Smith");
    form.set_field(FieldName::Size, "S");
    form.submit(&gw).await.unwrap();

    let view = FormView::build(&form, &default_toppings());
    let banner = view.banner.unwrap();
    assert_eq!(banner.class(), "success");
    assert!(banner.message.starts_with("Thank you for your order, Alice Smith!"));
    assert_eq!(server.received().await.len(), 2);
}

#[tokio::test]
async fn invalid_form_never_reaches_endpoint() {
    let server = StubServer::spawn(StubMode::Validate).await.unwrap();
    let gw = HttpOrderGateway::new(server.order_url());

    let mut form = OrderFormController::new();
    form.set_field(FieldName::FullName, "Al");
    form.set_field(FieldName::Size, "M");

    let err = form.submit(&gw).await.unwrap_err();
    assert_eq!(err, SubmitError::Rejected(SubmitRejected::Disabled));
    assert!(server.received().await.is_empty());
    assert_eq!(form.draft().full_name, "Al");
}

#[tokio::test]
async fn garbage_response_is_a_fault_and_keeps_draft() {
    let server = StubServer::spawn(StubMode::Garbage { status: 502 })
        .await
        .unwrap();
    let gw = HttpOrderGateway::new(server.order_url());

    let mut form = alice_large_green_peppers();
    let err = form.submit(&gw).await.unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Gateway(GatewayError::Decode { status: 502, .. })
    ));
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(form.draft().full_name, "Alice Smith");
    assert!(form.outcome().is_none());
}

#[tokio::test]
async fn split_submission_serialises_attempts() {
    let gw = ScriptedGateway::new()
        .then_success("first")
        .then_success("second");
    let mut form = alice_large_green_peppers();

    let ticket = form.begin_submit().unwrap();
    // The host keeps accepting events while the request is outstanding.
    form.set_field(FieldName::FullName, "Typed Meanwhile");
    assert_eq!(form.begin_submit().unwrap_err(), SubmitRejected::InFlight);

    let reply = gw.submit(ticket.draft()).await;
    form.complete_submit(ticket, reply).unwrap();
    assert_eq!(form.outcome().unwrap().message, "first");
    assert!(form.draft().is_empty());

    let sent = gw.submitted();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].full_name, "Alice Smith");
}

#[tokio::test]
async fn form_is_reusable_after_each_response() {
    let gw = ScriptedGateway::new()
        .then_failure("Oven is cold")
        .then_success("Order placed")
        .then_success("Order placed again");
    let mut form = OrderFormController::new();

    for expected in ["Oven is cold", "Order placed", "Order placed again"] {
        form.set_field(FieldName::FullName, "Alice Smith");
        form.set_field(FieldName::Size, "L");
        let out = form.submit(&gw).await.unwrap();
        assert_eq!(out.message, expected);
        assert!(form.draft().is_empty());
    }
    assert_eq!(gw.calls(), 3);
}
