use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::application::WalletService;
use crate::domain::{Account, PaymentView, TransferRequest};

mod error;

use error::ServerError;

/// Mount the service endpoints:
///
///   POST /v1/payments   execute a transfer
///   GET  /v1/payments   list all payments (double-entry views)
///   GET  /v1/accounts   list all accounts
pub fn router(service: Arc<WalletService>) -> Router {
    Router::new()
        .route("/v1/payments", post(post_payment).get(get_payments))
        .route("/v1/accounts", get(get_accounts))
        .with_state(service)
}

async fn post_payment(
    State(service): State<Arc<WalletService>>,
    Json(req): Json<TransferRequest>,
) -> Result<StatusCode, ServerError> {
    service.post_payment(&req).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_payments(
    State(service): State<Arc<WalletService>>,
) -> Result<Json<Vec<PaymentView>>, ServerError> {
    let payments = service.get_payments().await?;
    Ok(Json(payments))
}

async fn get_accounts(
    State(service): State<Arc<WalletService>>,
) -> Result<Json<Vec<Account>>, ServerError> {
    let accounts = service.get_accounts().await?;
    Ok(Json(accounts))
}
