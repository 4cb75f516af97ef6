/**
 * Invoice Data Types
 *
 * Provider-agnostic invoice shapes: what we ask a provider to invoice and
 * what it answers. Provider-specific field names live in `provider.rs`.
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Customer document type accepted by the tax authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DocType {
    /// National identity document
    #[default]
    Dni,
    /// Tax identification number
    Cuit,
}

/// One invoice line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub currency: String,
}

impl InvoiceItem {
    /// Build an item in the default currency (ARS)
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            currency: "ARS".to_string(),
        }
    }
}

/// A request to issue an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRequest {
    pub customer_email: String,
    pub customer_name: String,
    pub doc_type: DocType,
    /// Customer document number; empty when unknown
    pub doc_number: String,
    pub items: Vec<InvoiceItem>,
}

/// The provider's answer
///
/// `ok` is false when the provider rejected the invoice; `raw` keeps the
/// provider payload (or the rejection status and body) for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub ok: bool,
    /// Invoicing authorization code (CAE)
    pub cae: Option<String>,
    pub pdf_url: Option<String>,
    /// Invoice number assigned by the provider
    pub number: Option<String>,
    pub raw: Option<Value>,
}
