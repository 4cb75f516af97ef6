//! Billing Module
//!
//! Bridge between incoming payment notifications and the external
//! invoicing provider (Facturante). The provider is modeled as a trait so
//! the HTTP implementation stays a seam: the webhook maps a payment into a
//! generic `InvoiceRequest` and any `BillingProvider` can turn that into an
//! issued invoice.
//!
//! # Module Structure
//!
//! ```text
//! billing/
//! ├── mod.rs          - Module exports, BillingError
//! ├── types.rs        - InvoiceItem / InvoiceRequest / InvoiceResponse
//! ├── provider.rs     - BillingProvider trait + FacturanteProvider
//! └── service.rs      - Payment payload → InvoiceRequest mapping
//! ```

use thiserror::Error;

/// Invoice data types
pub mod types;

/// Invoicing provider trait and the Facturante implementation
pub mod provider;

/// Payment payload mapping
pub mod service;

pub use provider::{BillingProvider, FacturanteProvider};
pub use types::{DocType, InvoiceItem, InvoiceRequest, InvoiceResponse};

/// Billing errors
///
/// Mapping failures (the notification payload is unusable) are client
/// errors; transport failures talking to the provider are upstream errors.
#[derive(Debug, Error)]
pub enum BillingError {
    /// The payment payload cannot be mapped to an invoice request
    #[error("invalid payment payload: {0}")]
    InvalidPayload(String),

    /// The HTTP call to the invoicing provider failed
    #[error("billing provider request failed: {0}")]
    Http(#[from] reqwest::Error),
}
