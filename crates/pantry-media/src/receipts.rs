// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document-analysis client for receipt images and PDFs.
//!
//! Analysis is asynchronous on the service side: the document is submitted,
//! the service answers `202 Accepted` with an `Operation-Location` header,
//! and the client polls that URL until the operation settles or the poll
//! budget runs out.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use pantry_config::model::ReceiptsConfig;
use pantry_core::error::PantryError;
use pantry_core::traits::{PluginAdapter, ReceiptAnalyzer};
use pantry_core::types::{HealthStatus, ReceiptData, ReceiptItem};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::dates::{parse_receipt_date, parse_receipt_time};

const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OPERATION_LOCATION: &str = "Operation-Location";

/// Connection and polling parameters for [`ReceiptClient`].
#[derive(Debug, Clone)]
pub struct ReceiptClientSettings {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub model: String,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
}

impl ReceiptClientSettings {
    /// Returns `None` unless both endpoint and key are configured.
    pub fn from_config(config: &ReceiptsConfig) -> Option<Self> {
        Some(Self {
            endpoint: config.endpoint.clone()?,
            api_key: config.api_key.clone()?,
            api_version: config.api_version.clone(),
            model: config.model.clone(),
            poll_interval: config.poll_interval(),
            max_poll_attempts: config.max_poll_attempts,
        })
    }
}

pub struct ReceiptClient {
    client: reqwest::Client,
    settings: ReceiptClientSettings,
}

impl ReceiptClient {
    pub fn new(mut settings: ReceiptClientSettings) -> Result<Self, PantryError> {
        settings.endpoint = settings.endpoint.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| PantryError::Provider {
                message: format!("failed to build receipt HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client, settings })
    }

    fn analyze_url(&self) -> String {
        format!(
            "{}/documentintelligence/documentModels/{}:analyze?api-version={}",
            self.settings.endpoint, self.settings.model, self.settings.api_version
        )
    }

    async fn start_analysis(
        &self,
        document: Vec<u8>,
        content_type: &str,
    ) -> Result<String, PantryError> {
        let response = self
            .client
            .post(self.analyze_url())
            .header(CONTENT_TYPE, content_type)
            .header(KEY_HEADER, &self.settings.api_key)
            .body(document)
            .send()
            .await
            .map_err(request_error)?;

        if response.status() != StatusCode::ACCEPTED {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(provider(format!(
                "analysis request failed with status {status}: {body}"
            )));
        }

        response
            .headers()
            .get(OPERATION_LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| provider("analysis response has no Operation-Location header"))
    }

    async fn poll(&self, operation: &str) -> Result<AnalyzeResult, PantryError> {
        for attempt in 1..=self.settings.max_poll_attempts {
            let response = self
                .client
                .get(operation)
                .header(KEY_HEADER, &self.settings.api_key)
                .send()
                .await
                .map_err(request_error)?;

            let status = response.status();
            if status != StatusCode::OK {
                let body = response.text().await.unwrap_or_default();
                return Err(provider(format!(
                    "status request failed with status {status}: {body}"
                )));
            }

            let operation_status: OperationStatus =
                response.json().await.map_err(|e| PantryError::Provider {
                    message: format!("failed to decode analysis status: {e}"),
                    source: Some(Box::new(e)),
                })?;

            if let Some(err) = operation_status.error {
                return Err(provider(format!(
                    "document analysis error: {} - {}",
                    err.code, err.message
                )));
            }

            match operation_status.status.as_str() {
                "succeeded" => {
                    return operation_status
                        .analyze_result
                        .ok_or_else(|| provider("analysis succeeded without a result"));
                }
                "failed" => return Err(provider("document analysis failed")),
                "running" | "notStarted" => {
                    debug!(attempt, "receipt analysis still running");
                }
                other => return Err(provider(format!("unexpected analysis status: {other}"))),
            }

            if attempt < self.settings.max_poll_attempts {
                tokio::time::sleep(self.settings.poll_interval).await;
            }
        }

        Err(PantryError::Timeout {
            duration: self.settings.poll_interval * self.settings.max_poll_attempts,
        })
    }
}

fn provider(message: impl Into<String>) -> PantryError {
    PantryError::Provider {
        message: message.into(),
        source: None,
    }
}

fn request_error(e: reqwest::Error) -> PantryError {
    PantryError::Provider {
        message: format!("receipt service request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl PluginAdapter for ReceiptClient {
    fn name(&self) -> &str {
        "receipt-analyzer"
    }

    async fn health_check(&self) -> Result<HealthStatus, PantryError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ReceiptAnalyzer for ReceiptClient {
    async fn analyze(
        &self,
        document: Vec<u8>,
        content_type: &str,
    ) -> Result<ReceiptData, PantryError> {
        let size = document.len();
        let operation = self.start_analysis(document, content_type).await?;
        let result = self.poll(&operation).await.inspect_err(|e| {
            warn!(error = %e, "receipt analysis did not complete");
        })?;
        let data = receipt_from_result(result)?;
        info!(
            bytes = size,
            items = data.items.len(),
            confidence = data.confidence,
            "receipt analyzed"
        );
        Ok(data)
    }
}

// --- Wire format ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationStatus {
    status: String,
    #[serde(default)]
    analyze_result: Option<AnalyzeResult>,
    #[serde(default)]
    error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
struct OperationError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct AnalyzeResult {
    #[serde(default)]
    documents: Vec<AnalyzedDocument>,
}

#[derive(Debug, Deserialize)]
struct AnalyzedDocument {
    #[serde(default)]
    fields: HashMap<String, Field>,
    #[serde(default)]
    confidence: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Field {
    value_string: Option<String>,
    value_number: Option<f64>,
    value_date: Option<String>,
    value_time: Option<String>,
    #[serde(default)]
    value_array: Vec<Field>,
    #[serde(default)]
    value_object: HashMap<String, Field>,
    value_currency: Option<CurrencyValue>,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrencyValue {
    amount: f64,
    #[serde(default)]
    currency_code: Option<String>,
}

impl Field {
    /// Currency amount first, then a bare number.
    fn amount(&self) -> Option<f64> {
        self.value_currency
            .as_ref()
            .map(|c| c.amount)
            .or(self.value_number)
    }

    fn text(&self) -> Option<String> {
        non_empty(self.value_string.as_deref()).or_else(|| non_empty(Some(&self.content)))
    }

    fn content(&self) -> Option<String> {
        non_empty(Some(&self.content))
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn receipt_from_result(result: AnalyzeResult) -> Result<ReceiptData, PantryError> {
    let doc = result
        .documents
        .into_iter()
        .next()
        .ok_or_else(|| provider("no documents found in analysis result"))?;
    let fields = &doc.fields;

    let mut data = ReceiptData {
        confidence: doc.confidence,
        merchant_name: fields.get("MerchantName").and_then(Field::text),
        merchant_address: fields.get("MerchantAddress").and_then(Field::content),
        merchant_phone: fields.get("MerchantPhoneNumber").and_then(Field::content),
        country_region: fields.get("CountryRegion").and_then(Field::text),
        receipt_type: fields.get("ReceiptType").and_then(Field::text),
        ..ReceiptData::default()
    };

    if let Some(field) = fields.get("TransactionDate") {
        data.transaction_date = field
            .value_date
            .as_deref()
            .and_then(parse_receipt_date)
            .or_else(|| parse_receipt_date(&field.content));
    }
    if let Some(field) = fields.get("TransactionTime") {
        data.transaction_time = field
            .value_time
            .as_deref()
            .and_then(parse_receipt_time)
            .or_else(|| parse_receipt_time(&field.content));
    }

    data.subtotal = fields.get("Subtotal").and_then(Field::amount).unwrap_or(0.0);
    data.tax = match fields.get("TotalTax") {
        Some(field) => field.amount().unwrap_or(0.0),
        None => fields
            .get("TaxDetails")
            .map(|details| {
                details
                    .value_array
                    .iter()
                    .filter_map(|d| d.value_object.get("Amount"))
                    .filter_map(Field::amount)
                    .sum()
            })
            .unwrap_or(0.0),
    };
    if let Some(total) = fields.get("Total") {
        data.total = total.amount().unwrap_or(0.0);
        data.currency = total
            .value_currency
            .as_ref()
            .and_then(|c| non_empty(c.currency_code.as_deref()));
    }

    if let Some(items) = fields.get("Items") {
        data.items = items
            .value_array
            .iter()
            .filter(|f| !f.value_object.is_empty())
            .map(|f| receipt_item(&f.value_object))
            .collect();
    }

    if data.subtotal == 0.0 && data.total > 0.0 {
        data.subtotal = data.total - data.tax;
    }

    Ok(data)
}

fn receipt_item(obj: &HashMap<String, Field>) -> ReceiptItem {
    let quantity = obj
        .get("Quantity")
        .and_then(|f| f.value_number)
        .filter(|q| *q > 0.0)
        .map(|q| q as u32)
        .unwrap_or(0);
    let total_price = obj.get("TotalPrice").and_then(Field::amount).unwrap_or(0.0);
    let mut price = obj.get("Price").and_then(Field::amount).unwrap_or(0.0);
    if price == 0.0 && total_price > 0.0 && quantity > 0 {
        price = total_price / f64::from(quantity);
    }

    ReceiptItem {
        name: obj
            .get("Description")
            .and_then(Field::text)
            .unwrap_or_default(),
        quantity,
        price,
        total_price,
        category: obj.get("Category").and_then(Field::text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(endpoint: &str) -> ReceiptClientSettings {
        ReceiptClientSettings {
            endpoint: endpoint.to_string(),
            api_key: "key-1".into(),
            api_version: "2024-11-30".into(),
            model: "prebuilt-receipt".into(),
            poll_interval: Duration::from_millis(10),
            max_poll_attempts: 3,
        }
    }

    fn succeeded_body() -> serde_json::Value {
        serde_json::json!({
            "status": "succeeded",
            "analyzeResult": {
                "apiVersion": "2024-11-30",
                "modelId": "prebuilt-receipt",
                "documents": [{
                    "docType": "receipt.retailMeal",
                    "confidence": 0.93,
                    "fields": {
                        "MerchantName": {"type": "string", "valueString": "Corner Shop", "content": "CORNER SHOP"},
                        "MerchantAddress": {"type": "address", "content": "1 Main St"},
                        "TransactionDate": {"type": "date", "content": "31.12.2024"},
                        "TransactionTime": {"type": "time", "content": "18:45"},
                        "TaxDetails": {"type": "array", "valueArray": [
                            {"type": "object", "valueObject": {"Amount": {"type": "currency", "valueCurrency": {"amount": 0.5, "currencyCode": "EUR"}}}},
                            {"type": "object", "valueObject": {"Amount": {"type": "number", "valueNumber": 0.25}}}
                        ]},
                        "Total": {"type": "currency", "valueCurrency": {"amount": 10.75, "currencyCode": "EUR"}},
                        "Items": {"type": "array", "valueArray": [
                            {"type": "object", "valueObject": {
                                "Description": {"type": "string", "valueString": "Milk"},
                                "Quantity": {"type": "number", "valueNumber": 2},
                                "TotalPrice": {"type": "currency", "valueCurrency": {"amount": 3.0, "currencyCode": "EUR"}}
                            }},
                            {"type": "object", "valueObject": {
                                "Description": {"type": "string", "valueString": "Bread"},
                                "Price": {"type": "number", "valueNumber": 2.5},
                                "TotalPrice": {"type": "number", "valueNumber": 2.5}
                            }}
                        ]}
                    }
                }]
            }
        })
    }

    async fn mount_submit(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path(
                "/documentintelligence/documentModels/prebuilt-receipt:analyze",
            ))
            .and(query_param("api-version", "2024-11-30"))
            .and(header("Ocp-Apim-Subscription-Key", "key-1"))
            .and(header("content-type", "image/jpeg"))
            .respond_with(ResponseTemplate::new(202).insert_header(
                "Operation-Location",
                format!("{}/operations/op-1", server.uri()).as_str(),
            ))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn polls_until_succeeded_and_extracts_fields() {
        let server = MockServer::start().await;
        mount_submit(&server).await;
        Mock::given(method("GET"))
            .and(path("/operations/op-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "running"})),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/operations/op-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(succeeded_body()))
            .mount(&server)
            .await;

        let client = ReceiptClient::new(settings(&server.uri())).unwrap();
        let data = client.analyze(vec![0xFF, 0xD8], "image/jpeg").await.unwrap();

        assert_eq!(data.merchant_name.as_deref(), Some("Corner Shop"));
        assert_eq!(data.merchant_address.as_deref(), Some("1 Main St"));
        assert_eq!(data.transaction_date, NaiveDate::from_ymd_opt(2024, 12, 31));
        assert_eq!(data.transaction_time, NaiveTime::from_hms_opt(18, 45, 0));
        assert_eq!(data.currency.as_deref(), Some("EUR"));
        assert!((data.tax - 0.75).abs() < 1e-9);
        assert!((data.total - 10.75).abs() < 1e-9);
        assert!((data.subtotal - 10.0).abs() < 1e-9);
        assert_eq!(data.items.len(), 2);
        assert_eq!(data.items[0].quantity, 2);
        assert!((data.items[0].price - 1.5).abs() < 1e-9);
        assert_eq!(data.items[1].name, "Bread");
        assert!((data.confidence - 0.93).abs() < 1e-9);
    }

    #[tokio::test]
    async fn failed_operation_is_provider_error() {
        let server = MockServer::start().await;
        mount_submit(&server).await;
        Mock::given(method("GET"))
            .and(path("/operations/op-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "failed"})),
            )
            .mount(&server)
            .await;

        let client = ReceiptClient::new(settings(&server.uri())).unwrap();
        let err = client.analyze(vec![1], "image/jpeg").await.unwrap_err();
        assert!(err.to_string().contains("document analysis failed"));
    }

    #[tokio::test]
    async fn polling_is_bounded() {
        let server = MockServer::start().await;
        mount_submit(&server).await;
        Mock::given(method("GET"))
            .and(path("/operations/op-1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "notStarted"})),
            )
            .expect(3)
            .mount(&server)
            .await;

        let client = ReceiptClient::new(settings(&server.uri())).unwrap();
        let err = client.analyze(vec![1], "image/jpeg").await.unwrap_err();
        assert!(matches!(err, PantryError::Timeout { .. }));
    }

    #[tokio::test]
    async fn submit_without_202_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let client = ReceiptClient::new(settings(&server.uri())).unwrap();
        let err = client.analyze(vec![1], "image/jpeg").await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn total_tax_wins_over_tax_details() {
        let body = serde_json::json!({
            "documents": [{
                "confidence": 0.5,
                "fields": {
                    "TotalTax": {"valueNumber": 1.0},
                    "TaxDetails": {"valueArray": [{"valueObject": {"Amount": {"valueNumber": 9.0}}}]},
                    "Subtotal": {"valueCurrency": {"amount": 4.0}},
                    "Total": {"valueNumber": 5.0}
                }
            }]
        });
        let result: AnalyzeResult = serde_json::from_value(body).unwrap();
        let data = receipt_from_result(result).unwrap();
        assert_eq!(data.tax, 1.0);
        assert_eq!(data.subtotal, 4.0);
        assert_eq!(data.currency, None);
    }

    #[test]
    fn empty_result_is_an_error() {
        let err = receipt_from_result(AnalyzeResult::default()).unwrap_err();
        assert!(err.to_string().contains("no documents"));
    }

    #[test]
    fn settings_need_endpoint_and_key() {
        let mut config = ReceiptsConfig::default();
        assert!(ReceiptClientSettings::from_config(&config).is_none());
        config.endpoint = Some("https://example.test".into());
        config.api_key = Some("k".into());
        let settings = ReceiptClientSettings::from_config(&config).unwrap();
        assert_eq!(settings.model, "prebuilt-receipt");
    }
}
