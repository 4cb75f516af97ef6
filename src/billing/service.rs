/**
 * Payment → Invoice Mapping
 *
 * Maps a Mercado Pago payment notification into a provider-agnostic
 * `InvoiceRequest`. Items come from the payment's `additional_info.items`;
 * when the notification carries none, a single item is synthesized from the
 * payment description and amount.
 */

use serde::Deserialize;
use serde_json::Value;

use crate::billing::types::{DocType, InvoiceItem, InvoiceRequest};
use crate::billing::BillingError;

fn default_quantity() -> f64 {
    1.0
}

/// Payer block of a payment notification
#[derive(Debug, Deserialize)]
struct Payer {
    email: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
}

/// One purchased item as reported by the payment provider
#[derive(Debug, Deserialize)]
struct PaymentItem {
    title: String,
    #[serde(default = "default_quantity")]
    quantity: f64,
    unit_price: f64,
}

#[derive(Debug, Default, Deserialize)]
struct AdditionalInfo {
    #[serde(default)]
    items: Vec<PaymentItem>,
}

/// The slice of a Mercado Pago payment we need for invoicing
#[derive(Debug, Deserialize)]
struct Payment {
    payer: Payer,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    transaction_amount: Option<f64>,
    #[serde(default)]
    additional_info: AdditionalInfo,
}

/// Map a payment notification payload into an invoice request
///
/// # Errors
///
/// `BillingError::InvalidPayload` when the payload lacks the payer email or
/// carries no items and no description/amount to synthesize one from.
pub fn invoice_request_for_payment(payload: &Value) -> Result<InvoiceRequest, BillingError> {
    let payment: Payment = serde_json::from_value(payload.clone())
        .map_err(|e| BillingError::InvalidPayload(e.to_string()))?;

    let name = format!("{} {}", payment.payer.first_name, payment.payer.last_name)
        .trim()
        .to_string();

    let items: Vec<InvoiceItem> = if payment.additional_info.items.is_empty() {
        let description = payment
            .description
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                BillingError::InvalidPayload("payment has no items and no description".to_string())
            })?;
        let amount = payment.transaction_amount.ok_or_else(|| {
            BillingError::InvalidPayload("payment has no items and no amount".to_string())
        })?;
        vec![InvoiceItem::new(description, 1.0, amount)]
    } else {
        payment
            .additional_info
            .items
            .into_iter()
            .map(|it| InvoiceItem::new(it.title, it.quantity, it.unit_price))
            .collect()
    };

    Ok(InvoiceRequest {
        customer_email: payment.payer.email,
        customer_name: name,
        doc_type: DocType::default(),
        doc_number: String::new(),
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapping_with_items() {
        let payload = json!({
            "status": "approved",
            "payer": {"email": "payer@example.com", "first_name": "Ada", "last_name": "Lovelace"},
            "additional_info": {
                "items": [
                    {"title": "AlertTrail Pro", "quantity": 2, "unit_price": 1500.0},
                    {"title": "Setup fee", "unit_price": 300.0}
                ]
            }
        });

        let request = invoice_request_for_payment(&payload).unwrap();
        assert_eq!(request.customer_email, "payer@example.com");
        assert_eq!(request.customer_name, "Ada Lovelace");
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[0].quantity, 2.0);
        // missing quantity defaults to 1
        assert_eq!(request.items[1].quantity, 1.0);
        assert_eq!(request.items[1].currency, "ARS");
    }

    #[test]
    fn test_mapping_falls_back_to_description() {
        let payload = json!({
            "payer": {"email": "payer@example.com"},
            "description": "AlertTrail Pro subscription",
            "transaction_amount": 9999.0
        });

        let request = invoice_request_for_payment(&payload).unwrap();
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].description, "AlertTrail Pro subscription");
        assert_eq!(request.items[0].unit_price, 9999.0);
        assert_eq!(request.items[0].quantity, 1.0);
    }

    #[test]
    fn test_mapping_trims_partial_name() {
        let payload = json!({
            "payer": {"email": "payer@example.com", "first_name": "Ada"},
            "description": "sub",
            "transaction_amount": 1.0
        });

        let request = invoice_request_for_payment(&payload).unwrap();
        assert_eq!(request.customer_name, "Ada");
    }

    #[test]
    fn test_mapping_missing_payer_is_invalid() {
        let payload = json!({ "status": "approved" });
        let result = invoice_request_for_payment(&payload);
        assert!(matches!(result, Err(BillingError::InvalidPayload(_))));
    }

    #[test]
    fn test_mapping_no_items_no_description_is_invalid() {
        let payload = json!({
            "payer": {"email": "payer@example.com"},
            "transaction_amount": 10.0
        });
        let result = invoice_request_for_payment(&payload);
        assert!(matches!(result, Err(BillingError::InvalidPayload(_))));
    }
}
