// ABOUTME: REST API library for Groundwork
// ABOUTME: Application state and router assembly for all workflow endpoints

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use groundwork_ai::EstimateService;
use groundwork_projects::DbState;

pub mod chat_handlers;
pub mod contract_handlers;
pub mod current_user;
pub mod finance_handlers;
pub mod payment_handlers;
pub mod project_handlers;
pub mod proposal_handlers;
pub mod response;
pub mod sales_handlers;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub ai: Arc<EstimateService>,
}

impl AppState {
    pub fn new(db: DbState, ai: EstimateService) -> Self {
        Self {
            db,
            ai: Arc::new(ai),
        }
    }
}

/// Creates the Groundwork API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Sales: lead intake and proposals
        .route("/api/sales/getLeads", get(sales_handlers::list_leads))
        .route("/api/sales/createLead", post(sales_handlers::create_lead))
        .route(
            "/api/sales/leads/{lead_id}/status",
            put(sales_handlers::update_lead_status),
        )
        .route("/api/sales/getProposals", get(sales_handlers::list_proposals))
        .route(
            "/api/sales/createProposal",
            post(sales_handlers::create_proposal),
        )
        // Project manager: proposal decision and contract signing
        .route(
            "/api/projectManager/respond/{token}",
            get(proposal_handlers::get_proposal_for_response),
        )
        .route(
            "/api/projectManager/respond",
            post(proposal_handlers::respond_to_proposal),
        )
        .route(
            "/api/projectManager/contract/{proposal_id}",
            get(contract_handlers::get_contract).put(contract_handlers::set_document),
        )
        .route(
            "/api/projectManager/respondToContract",
            post(contract_handlers::respond_to_contract),
        )
        // Finance: review queue and payment schedules
        .route(
            "/api/finance/getContracts",
            get(finance_handlers::list_pending_contracts),
        )
        .route(
            "/api/finance/contracts/{contract_id}/schedule",
            post(finance_handlers::create_schedule),
        )
        .route(
            "/api/finance/contracts/{contract_id}/{action}",
            post(finance_handlers::review_contract),
        )
        // Payments
        .route(
            "/api/payments/contract/{contract_id}",
            get(payment_handlers::list_for_contract),
        )
        .route("/api/payments/pay/{payment_id}", put(payment_handlers::pay))
        // Client project tracking
        .route(
            "/api/engr/getClientProject/{user_id}",
            get(project_handlers::get_client_project),
        )
        // AI estimation chat
        .route("/api/chat", post(chat_handlers::chat))
        .with_state(state)
}
