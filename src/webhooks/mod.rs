//! Payment webhook endpoints

/// Mercado Pago notification handler
pub mod handlers;

pub use handlers::mpago_webhook;
