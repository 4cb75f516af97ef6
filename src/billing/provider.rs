/**
 * Invoicing Provider
 *
 * `BillingProvider` is the seam; `FacturanteProvider` is the one real
 * implementation, mapping our generic invoice request onto the Facturante
 * API (Factura C for a monotributo seller).
 *
 * # Failure Modes
 *
 * - transport error (DNS, TLS, timeout) → `BillingError::Http`
 * - provider answered non-2xx → `Ok` with `ok = false` and the status/body
 *   captured in `raw`
 */

use serde_json::{json, Value};
use std::time::Duration;

use crate::billing::types::{DocType, InvoiceRequest, InvoiceResponse};
use crate::billing::BillingError;
use crate::server::config::Settings;

/// Facturante invoice endpoint
const FACTURANTE_API_URL: &str = "https://api.facturante.com/api/invoices";

/// Per-request timeout for provider calls
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(20);

/// Invoice type 11 = Factura C
const TIPO_CMP_FACTURA_C: u32 = 11;

/// An external service that can issue invoices
#[allow(async_fn_in_trait)]
pub trait BillingProvider {
    /// Issue an invoice for the given request
    async fn create_invoice(&self, data: &InvoiceRequest)
        -> Result<InvoiceResponse, BillingError>;
}

/// Facturante HTTP client
#[derive(Debug, Clone)]
pub struct FacturanteProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    cuit: Option<String>,
    pto_vta: u32,
}

impl FacturanteProvider {
    /// Build the provider from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: FACTURANTE_API_URL.to_string(),
            api_key: settings.fact_api_key.clone(),
            cuit: settings.fact_cuit.clone(),
            pto_vta: settings.fact_pto_vta,
        }
    }

    /// Point the provider at a different endpoint (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Map an invoice request onto the Facturante wire shape
    fn wire_payload(&self, data: &InvoiceRequest) -> Value {
        let doc_tipo = match data.doc_type {
            DocType::Dni => 99,
            DocType::Cuit => 80,
        };
        let doc_nro: i64 = data.doc_number.parse().unwrap_or(0);

        json!({
            "cuit": self.cuit,
            "ptoVta": self.pto_vta,
            "tipoCmp": TIPO_CMP_FACTURA_C,
            "concepto": 1,
            "docTipo": doc_tipo,
            "docNro": doc_nro,
            "moneda": "PES",
            "monCotiz": 1.0,
            "cbteDesde": 0,
            "cbteHasta": 0,
            "items": data.items.iter().map(|it| json!({
                "des": it.description,
                "qty": it.quantity,
                "imp": it.unit_price,
                "iva": 0,
            })).collect::<Vec<_>>(),
            "cliente": {
                "email": data.customer_email,
                "nombre": data.customer_name,
            },
        })
    }
}

/// Read a string field from the provider answer, tolerating numbers
fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl BillingProvider for FacturanteProvider {
    async fn create_invoice(
        &self,
        data: &InvoiceRequest,
    ) -> Result<InvoiceResponse, BillingError> {
        let payload = self.wire_payload(data);

        let mut request = self
            .client
            .post(&self.base_url)
            .timeout(PROVIDER_TIMEOUT)
            .json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if response.status().is_success() {
            let body: Value = response.json().await?;
            return Ok(InvoiceResponse {
                ok: true,
                cae: string_field(&body, "cae"),
                pdf_url: string_field(&body, "pdfUrl").or_else(|| string_field(&body, "pdf")),
                number: string_field(&body, "cbteNro"),
                raw: Some(body),
            });
        }

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        tracing::warn!("Facturante rejected invoice: status={} body={}", status, text);

        Ok(InvoiceResponse {
            ok: false,
            cae: None,
            pdf_url: None,
            number: None,
            raw: Some(json!({ "status": status, "text": text })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::types::InvoiceItem;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_provider(base_url: String) -> FacturanteProvider {
        FacturanteProvider {
            client: reqwest::Client::new(),
            base_url: FACTURANTE_API_URL.to_string(),
            api_key: Some("test-key".to_string()),
            cuit: Some("20123456789".to_string()),
            pto_vta: 3,
        }
        .with_base_url(base_url)
    }

    fn test_request() -> InvoiceRequest {
        InvoiceRequest {
            customer_email: "payer@example.com".to_string(),
            customer_name: "Ada Lovelace".to_string(),
            doc_type: DocType::Dni,
            doc_number: "12345678".to_string(),
            items: vec![InvoiceItem::new("AlertTrail Pro", 1.0, 9999.0)],
        }
    }

    #[test]
    fn test_wire_payload_shape() {
        let provider = test_provider("http://unused".to_string());
        let payload = provider.wire_payload(&test_request());

        assert_eq!(payload["tipoCmp"], 11);
        assert_eq!(payload["concepto"], 1);
        assert_eq!(payload["docTipo"], 99);
        assert_eq!(payload["docNro"], 12345678);
        assert_eq!(payload["moneda"], "PES");
        assert_eq!(payload["ptoVta"], 3);
        assert_eq!(payload["items"][0]["des"], "AlertTrail Pro");
        assert_eq!(payload["items"][0]["iva"], 0);
        assert_eq!(payload["cliente"]["email"], "payer@example.com");
    }

    #[test]
    fn test_wire_payload_cuit_doc_type() {
        let provider = test_provider("http://unused".to_string());
        let mut request = test_request();
        request.doc_type = DocType::Cuit;

        let payload = provider.wire_payload(&request);
        assert_eq!(payload["docTipo"], 80);
    }

    #[test]
    fn test_wire_payload_unparseable_doc_number() {
        let provider = test_provider("http://unused".to_string());
        let mut request = test_request();
        request.doc_number = String::new();

        let payload = provider.wire_payload(&request);
        assert_eq!(payload["docNro"], 0);
    }

    #[tokio::test]
    async fn test_create_invoice_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/invoices"))
            .and(body_partial_json(serde_json::json!({ "tipoCmp": 11 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cae": "71234567890123",
                "pdfUrl": "https://facturante.example/inv/42.pdf",
                "cbteNro": 42,
            })))
            .mount(&server)
            .await;

        let provider = test_provider(format!("{}/invoices", server.uri()));
        let response = provider.create_invoice(&test_request()).await.unwrap();

        assert!(response.ok);
        assert_eq!(response.cae.as_deref(), Some("71234567890123"));
        assert_eq!(
            response.pdf_url.as_deref(),
            Some("https://facturante.example/inv/42.pdf")
        );
        assert_eq!(response.number.as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn test_create_invoice_provider_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/invoices"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid cuit"))
            .mount(&server)
            .await;

        let provider = test_provider(format!("{}/invoices", server.uri()));
        let response = provider.create_invoice(&test_request()).await.unwrap();

        assert!(!response.ok);
        assert_eq!(response.cae, None);
        let raw = response.raw.unwrap();
        assert_eq!(raw["status"], 422);
        assert_eq!(raw["text"], "invalid cuit");
    }

    #[tokio::test]
    async fn test_create_invoice_pdf_fallback_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/invoices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cae": "1",
                "pdf": "https://facturante.example/alt.pdf",
            })))
            .mount(&server)
            .await;

        let provider = test_provider(format!("{}/invoices", server.uri()));
        let response = provider.create_invoice(&test_request()).await.unwrap();

        assert_eq!(
            response.pdf_url.as_deref(),
            Some("https://facturante.example/alt.pdf")
        );
        assert_eq!(response.number, None);
    }
}
