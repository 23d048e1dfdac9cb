use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use labstock_core::BatchId;
use labstock_inventory::{
    usage_history, Batch, BatchDetail, BatchFilter, Chemical, DashboardStats, ExpiryInfo,
    IntakeForm, RecordIntake, RecordUsage, UsageEntry, UsageForm,
};

use crate::config::ClientConfig;
use crate::error::{error_detail, ClientError, ClientResult};

/// A batch as listed by the API, with the server's classification attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    #[serde(flatten)]
    pub batch: Batch,
    pub expiry: ExpiryInfo,
    pub stock_percent: f64,
}

/// Typed client for the inventory HTTP API.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: Client,
    base_url: String,
    origin: Url,
}

impl InventoryClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                config.base_url
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url,
            origin: parsed,
        })
    }

    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// True when `/health` on the API host answers with a success status.
    pub async fn health(&self) -> bool {
        let Ok(url) = self.origin.join("/health") else {
            return false;
        };
        match self.http.get(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                false
            }
        }
    }

    pub async fn dashboard(&self) -> ClientResult<DashboardStats> {
        self.send(self.http.get(self.url("/dashboard/"))).await
    }

    pub async fn chemicals(&self) -> ClientResult<Vec<Chemical>> {
        self.send(self.http.get(self.url("/chemicals/"))).await
    }

    pub async fn batches(&self, filter: &BatchFilter) -> ClientResult<Vec<BatchRow>> {
        let req = self.http.get(self.url("/batches/")).query(&filter.to_query_pairs());
        self.send(req).await
    }

    /// Batches with stock left, first-expiring first.
    pub async fn available_batches(&self) -> ClientResult<Vec<BatchRow>> {
        self.send(self.http.get(self.url("/batches/available/"))).await
    }

    pub async fn expiring_soon(&self, filter: &BatchFilter) -> ClientResult<Vec<BatchRow>> {
        let req = self.http.get(self.url("/batches/expiring-soon/")).query(&filter.to_query_pairs());
        self.send(req).await
    }

    pub async fn expired(&self, filter: &BatchFilter) -> ClientResult<Vec<BatchRow>> {
        let req = self.http.get(self.url("/batches/expired/")).query(&filter.to_query_pairs());
        self.send(req).await
    }

    pub async fn batch_detail(&self, batch_id: BatchId) -> ClientResult<BatchDetail> {
        self.send(self.http.get(self.url(&format!("/batches/{batch_id}/")))).await
    }

    /// Usage entries in recording order.
    pub async fn usage_logs(&self) -> ClientResult<Vec<UsageEntry>> {
        self.send(self.http.get(self.url("/usage-logs/"))).await
    }

    /// Usage entries newest first.
    pub async fn usage_history(&self) -> ClientResult<Vec<UsageEntry>> {
        let entries = self.usage_logs().await?;
        Ok(usage_history(&entries).into_iter().cloned().collect())
    }

    pub async fn create_in_entry(&self, cmd: &RecordIntake) -> ClientResult<Batch> {
        cmd.validate()?;
        let batch: Batch = self.send(self.http.post(self.url("/in-entry/")).json(cmd)).await?;
        tracing::info!(batch_id = %batch.batch_id(), batch_number = %batch.batch_number(), "intake recorded");
        Ok(batch)
    }

    pub async fn create_out_entry(&self, cmd: &RecordUsage) -> ClientResult<UsageEntry> {
        cmd.validate()?;
        let entry: UsageEntry = self.send(self.http.post(self.url("/out-entry/")).json(cmd)).await?;
        tracing::info!(usage_id = %entry.usage_id, batch_id = %entry.batch_id, "usage recorded");
        Ok(entry)
    }

    /// Parse raw form input, then submit. Malformed input never reaches the network.
    pub async fn submit_intake_form(&self, form: &IntakeForm) -> ClientResult<Batch> {
        let cmd = form.parse()?;
        self.create_in_entry(&cmd).await
    }

    pub async fn submit_usage_form(&self, form: &UsageForm) -> ClientResult<UsageEntry> {
        let cmd = form.parse()?;
        self.create_out_entry(&cmd).await
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let resp = req.send().await.map_err(|e| ClientError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ClientError::Network(e.to_string()))?;

        if !status.is_success() {
            let detail = error_detail(&body);
            tracing::debug!(status = status.as_u16(), %detail, "api rejected request");
            return Err(ClientError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
