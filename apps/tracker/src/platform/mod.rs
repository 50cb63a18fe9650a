/// Platform bindings: the single point of entry for every remote procedure
/// this service invokes (job queries, job-board search, application upserts,
/// tax computations).
///
/// Pipelines and handlers depend on the traits below, never on
/// `PlatformClient` directly, so they can run against in-memory fakes.
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::models::{Job, RecordId};

#[cfg(test)]
pub mod fake;

const TAX_CLASS: &str = "TaxCalculation";
const JOB_CLASS: &str = "JobController";
const APPLICATION_CLASS: &str = "JobApplicationController";
const JOB_BOARD_CLASS: &str = "JoobleJSONCallout";

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote error (status {status}): {message}")]
    Remote { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PlatformError {
    /// Human-readable message suitable for a toast.
    pub fn message(&self) -> String {
        match self {
            PlatformError::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Arguments of the job-board search callout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub keywords: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "radius")]
    pub radius_km: f64,
    pub salary: f64,
    #[serde(rename = "datecreatedfrom")]
    pub posted_since: NaiveDate,
    pub page: u32,
    #[serde(rename = "resultonpage")]
    pub page_size: u32,
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn query_jobs(&self) -> Result<Vec<Job>, PlatformError>;
    async fn delete_jobs(&self, ids: &[RecordId]) -> Result<(), PlatformError>;
    async fn delete_all_jobs(&self) -> Result<(), PlatformError>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Creates or updates one job application per job id.
    async fn upsert_job_applications(&self, ids: &[RecordId]) -> Result<(), PlatformError>;
}

#[async_trait]
pub trait JobBoard: Send + Sync {
    /// Runs a search against the external job board; results land in the job store.
    async fn submit_search(&self, request: &SearchRequest) -> Result<(), PlatformError>;
}

#[async_trait]
pub trait TaxService: Send + Sync {
    async fn federal_tax(&self, salary: f64) -> Result<f64, PlatformError>;
    async fn social_security_tax(&self, salary: f64) -> Result<f64, PlatformError>;
    async fn medicare_tax(&self, salary: f64) -> Result<f64, PlatformError>;
}

/// The set of remote collaborators, carried in `AppState`.
#[derive(Clone)]
pub struct Platform {
    pub jobs: Arc<dyn JobStore>,
    pub applications: Arc<dyn ApplicationStore>,
    pub job_board: Arc<dyn JobBoard>,
    pub taxes: Arc<dyn TaxService>,
}

impl Platform {
    /// Wires every collaborator to the same HTTP client.
    pub fn from_client(client: PlatformClient) -> Self {
        let client = Arc::new(client);
        Self {
            jobs: client.clone(),
            applications: client.clone(),
            job_board: client.clone(),
            taxes: client,
        }
    }
}

/// `recordIds` goes over the wire as a bare id for one row, an array otherwise.
#[derive(Serialize)]
#[serde(untagged)]
enum RecordIdsArg<'a> {
    One(&'a RecordId),
    Many(&'a [RecordId]),
}

impl<'a> From<&'a [RecordId]> for RecordIdsArg<'a> {
    fn from(ids: &'a [RecordId]) -> Self {
        match ids {
            [one] => RecordIdsArg::One(one),
            many => RecordIdsArg::Many(many),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    message: String,
}

/// HTTP client for the platform's remote procedures.
///
/// Calls are `POST {base_url}/{class}/{method}` with a JSON object of named
/// arguments. No timeout and no retry: a stalled call stalls its pipeline.
#[derive(Clone)]
pub struct PlatformClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl PlatformClient {
    pub fn new(base_url: String, access_token: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            access_token,
        }
    }

    async fn call<A: Serialize + ?Sized>(
        &self,
        class: &str,
        method: &str,
        args: &A,
    ) -> Result<String, PlatformError> {
        let url = format!("{}/{class}/{method}", self.base_url);
        debug!("Invoking {class}.{method}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(args)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PlatformError::Remote {
                status: status.as_u16(),
                message: remote_error_message(&body),
            });
        }

        debug!("{class}.{method} succeeded ({} bytes)", body.len());
        Ok(body)
    }

    async fn invoke<A: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        class: &str,
        method: &str,
        args: &A,
    ) -> Result<T, PlatformError> {
        let body = self.call(class, method, args).await?;
        serde_json::from_str(&body).map_err(PlatformError::Parse)
    }
}

/// Extracts the message from `{"message": ..}` or `[{"message": ..}, ..]` error bodies.
fn remote_error_message(body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<RemoteErrorBody>(body) {
        return err.message;
    }
    if let Ok(errs) = serde_json::from_str::<Vec<RemoteErrorBody>>(body) {
        if let Some(first) = errs.into_iter().next() {
            return first.message;
        }
    }
    if body.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl JobStore for PlatformClient {
    async fn query_jobs(&self) -> Result<Vec<Job>, PlatformError> {
        self.invoke(JOB_CLASS, "queryJobs", &json!({})).await
    }

    async fn delete_jobs(&self, ids: &[RecordId]) -> Result<(), PlatformError> {
        let args = json!({ "recordIds": RecordIdsArg::from(ids) });
        self.call(JOB_CLASS, "deleteJobs", &args).await.map(|_| ())
    }

    async fn delete_all_jobs(&self) -> Result<(), PlatformError> {
        self.call(JOB_CLASS, "deleteAllJobs", &json!({}))
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl ApplicationStore for PlatformClient {
    async fn upsert_job_applications(&self, ids: &[RecordId]) -> Result<(), PlatformError> {
        let args = json!({ "recordIds": RecordIdsArg::from(ids) });
        self.call(APPLICATION_CLASS, "upsertJobApplications", &args)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl JobBoard for PlatformClient {
    async fn submit_search(&self, request: &SearchRequest) -> Result<(), PlatformError> {
        self.call(JOB_BOARD_CLASS, "makePOSTCallout", request)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl TaxService for PlatformClient {
    async fn federal_tax(&self, salary: f64) -> Result<f64, PlatformError> {
        self.invoke(TAX_CLASS, "calculateFederalTax", &json!({ "salary": salary }))
            .await
    }

    async fn social_security_tax(&self, salary: f64) -> Result<f64, PlatformError> {
        self.invoke(
            TAX_CLASS,
            "calculateSocialSecurityTax",
            &json!({ "salary": salary }),
        )
        .await
    }

    async fn medicare_tax(&self, salary: f64) -> Result<f64, PlatformError> {
        self.invoke(TAX_CLASS, "calculateMedicareTax", &json!({ "salary": salary }))
            .await
    }
}
