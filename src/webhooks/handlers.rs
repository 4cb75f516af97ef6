/**
 * Payment Webhook Handler
 *
 * POST /webhooks/mpago - Mercado Pago payment notifications.
 *
 * Only `approved`/`accredited` payments are invoiced; anything else is
 * acknowledged and skipped so the provider stops retrying. A provider
 * failure surfaces as 502 and Mercado Pago retries the notification later.
 */

use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::auth::users::set_pro_by_email;
use crate::billing::provider::BillingProvider;
use crate::billing::service::invoice_request_for_payment;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Read the payment status from a notification payload
///
/// Checks `data.status` first (webhook envelope), then top-level `status`
/// (bare payment object).
fn payment_status(payload: &Value) -> Option<&str> {
    payload
        .get("data")
        .and_then(|d| d.get("status"))
        .and_then(Value::as_str)
        .or_else(|| payload.get("status").and_then(Value::as_str))
}

fn is_paid(status: Option<&str>) -> bool {
    matches!(status, Some("approved") | Some("accredited"))
}

/// Mercado Pago webhook handler
///
/// # Returns
///
/// * `{"ok": true, "skipped": true}` for payments that are not paid yet
/// * `{"ok": true, "cae": ..., "pdf": ..., "n": ...}` after invoicing
///
/// # Errors
///
/// * `400 Bad Request` - the payload cannot be mapped to an invoice
/// * `502 Bad Gateway` - the invoicing provider failed or rejected
pub async fn mpago_webhook(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let status = payment_status(&payload);
    if !is_paid(status) {
        tracing::info!("Webhook skipped, payment status: {:?}", status);
        return Ok(Json(serde_json::json!({ "ok": true, "skipped": true })));
    }

    let invoice_request = invoice_request_for_payment(&payload)?;

    let invoice = state.billing.create_invoice(&invoice_request).await?;
    if !invoice.ok {
        tracing::error!("Invoice rejected by provider: {:?}", invoice.raw);
        return Err(ApiError::BillingUpstream);
    }

    tracing::info!(
        "Invoice issued for {}: cae={:?} number={:?}",
        invoice_request.customer_email,
        invoice.cae,
        invoice.number
    );

    // Best-effort pro upgrade for the paying account; an unknown payer
    // email just means they paid before registering.
    if let Some(pool) = &state.db_pool {
        match set_pro_by_email(pool, &invoice_request.customer_email).await {
            Ok(true) => {
                tracing::info!("Marked {} as pro", invoice_request.customer_email)
            }
            Ok(false) => {
                tracing::warn!("No account for payer {}", invoice_request.customer_email)
            }
            Err(e) => tracing::error!("Pro upgrade failed: {:?}", e),
        }
    }

    // TODO: persist cae/pdf_url/number once an invoices table exists
    Ok(Json(serde_json::json!({
        "ok": true,
        "cae": invoice.cae,
        "pdf": invoice.pdf_url,
        "n": invoice.number,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_from_webhook_envelope() {
        let payload = json!({ "data": { "status": "approved" } });
        assert_eq!(payment_status(&payload), Some("approved"));
    }

    #[test]
    fn test_status_from_bare_payment() {
        let payload = json!({ "status": "accredited" });
        assert_eq!(payment_status(&payload), Some("accredited"));
    }

    #[test]
    fn test_envelope_status_wins() {
        let payload = json!({ "data": { "status": "pending" }, "status": "approved" });
        assert_eq!(payment_status(&payload), Some("pending"));
    }

    #[test]
    fn test_null_envelope_status_falls_back() {
        let payload = json!({ "data": { "status": null }, "status": "approved" });
        assert_eq!(payment_status(&payload), Some("approved"));
    }

    #[test]
    fn test_is_paid_gate() {
        assert!(is_paid(Some("approved")));
        assert!(is_paid(Some("accredited")));
        assert!(!is_paid(Some("pending")));
        assert!(!is_paid(Some("rejected")));
        assert!(!is_paid(None));
    }
}
