// ABOUTME: Integration tests for the API router
// ABOUTME: Drives the workflow scenarios end to end through axum with oneshot requests

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use groundwork_ai::EstimateService;
use groundwork_api::{create_router, AppState};
use groundwork_projects::DbState;

async fn test_app() -> Router {
    let db = DbState::connect_in_memory().await.unwrap();
    // No API key: the chat endpoint's upstream path fails with a 500
    let ai = EstimateService::with_config(
        None,
        "claude-test".to_string(),
        "http://localhost:9/v1/messages".to_string(),
    );
    create_router(AppState::new(db, ai))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn lead_body() -> Value {
    json!({
        "client_name": "Juan Dela Cruz",
        "contact_info": "09171234567",
        "project_interest": "bungalow",
        "budget": "500000",
        "timeline": "3 months"
    })
}

async fn create_lead(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/api/sales/createLead", Some(lead_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_proposal(app: &Router, lead_id: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/sales/createProposal",
        Some(json!({
            "lead_id": lead_id,
            "title": "Bungalow Construction",
            "budget_estimate": 480000.0,
            "payment_terms": "50/50",
            "scope_of_work": ["Site preparation", "Finishing"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"].clone()
}

/// Runs the chain up to an approved proposal, returning (proposal_id, contract_id).
async fn approved_proposal(app: &Router) -> (String, String) {
    let lead_id = create_lead(app).await;
    let proposal = create_proposal(app, &lead_id).await;
    let token = proposal["response_token"].as_str().unwrap();

    let (status, body) = send(
        app,
        Method::POST,
        "/api/projectManager/respond",
        Some(json!({"token": token, "response": "approved"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    (
        proposal["id"].as_str().unwrap().to_string(),
        body["data"]["contract"]["id"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn created_lead_appears_in_list_with_status_new() {
    let app = test_app().await;
    create_lead(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/sales/getLeads", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let leads = body["data"].as_array().unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["client_name"], json!("Juan Dela Cruz"));
    assert_eq!(leads[0]["status"], json!("new"));
}

#[tokio::test]
async fn create_lead_without_contact_is_a_validation_error() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sales/createLead",
        Some(json!({"client_name": "Juan", "contact_info": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("contact_info"));
}

#[tokio::test]
async fn response_token_is_single_use() {
    let app = test_app().await;
    let lead_id = create_lead(&app).await;
    let proposal = create_proposal(&app, &lead_id).await;
    let token = proposal["response_token"].as_str().unwrap();

    // The response page resolves the token
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/projectManager/respond/{}", token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("pending"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/projectManager/respond",
        Some(json!({"token": token, "response": "approved"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Second decision on the same token: conflict, first decision stands
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/projectManager/respond",
        Some(json!({"token": token, "response": "rejected"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/projectManager/respond/{}", token),
        None,
    )
    .await;
    assert_eq!(body["data"]["status"], json!("approved"));
}

#[tokio::test]
async fn unknown_token_is_not_found() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/projectManager/respond",
        Some(json!({"token": "no-such-token", "response": "approved"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contract_signing_is_terminal() {
    let app = test_app().await;
    let (proposal_id, _) = approved_proposal(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/projectManager/respondToContract",
        Some(json!({"proposal_id": proposal_id, "action": "digital"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("signed"));
    assert_eq!(body["data"]["signature_method"], json!("digital"));

    // A following rejection is refused
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/projectManager/respondToContract",
        Some(json!({"proposal_id": proposal_id, "action": "rejected"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/projectManager/contract/{}", proposal_id),
        None,
    )
    .await;
    assert_eq!(body["data"]["status"], json!("signed"));
}

#[tokio::test]
async fn finance_queue_empties_after_review() {
    let app = test_app().await;
    let (_, contract_id) = approved_proposal(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/finance/getContracts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/finance/contracts/{}/approve", contract_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/finance/getContracts", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    // A second review conflicts and the state is unchanged
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/finance/contracts/{}/reject", contract_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_review_action_is_a_validation_error() {
    let app = test_app().await;
    let (_, contract_id) = approved_proposal(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/finance/contracts/{}/escalate", contract_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn payments_flow_through_schedule_and_pay() {
    let app = test_app().await;
    let (proposal_id, contract_id) = approved_proposal(&app).await;

    // Empty schedule reads as an empty list, not an error
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/payments/contract/{}", contract_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());

    // Scheduling requires a signed contract
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/finance/contracts/{}/schedule", contract_id),
        Some(json!({"installments": [{"amount": 240000.0, "due_date": "2025-09-01"}]})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    send(
        &app,
        Method::POST,
        "/api/projectManager/respondToContract",
        Some(json!({"proposal_id": proposal_id, "action": "in_person"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/finance/contracts/{}/schedule", contract_id),
        Some(json!({"installments": [
            {"amount": 240000.0, "due_date": "2025-09-01"},
            {"amount": 240000.0, "due_date": "2025-12-01"}
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let payments = body["data"].as_array().unwrap();
    assert_eq!(payments.len(), 2);
    assert_eq!(payments[0]["status"], json!("Pending"));
    let payment_id = payments[0]["id"].as_str().unwrap().to_string();

    // Pay, then pay again: idempotent success
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/payments/pay/{}", payment_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("Paid"));
    let first_paid_at = body["data"]["paid_at"].clone();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/payments/pay/{}", payment_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("Paid"));
    assert_eq!(body["data"]["paid_at"], first_paid_at);
    assert_eq!(body["data"]["amount"], json!(240000.0));
}

#[tokio::test]
async fn client_project_view_aggregates_the_chain() {
    let app = test_app().await;
    let lead_id = create_lead(&app).await;
    create_proposal(&app, &lead_id).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/engr/getClientProject/{}", lead_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["lead"]["id"], json!(lead_id.clone()));
    assert_eq!(body["data"]["lead"]["status"], json!("converted"));
    assert!(body["data"]["proposal"].is_object());
    assert!(body["data"]["contract"].is_null());

    let (status, _) = send(&app, Method::GET, "/api/engr/getClientProject/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_requires_a_message() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({"message": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn chat_upstream_failure_is_a_generic_service_error() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({"message": "How much for a bungalow?"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Failed to get estimate"));
}
