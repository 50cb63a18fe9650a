//! In-memory platform used by unit tests. Records every call in order and
//! fails the calls it is told to fail.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{
    ApplicationStore, JobBoard, JobStore, Platform, PlatformError, SearchRequest, TaxService,
};
use crate::models::{Job, RecordId};

#[derive(Default)]
struct FakeState {
    jobs: Mutex<Vec<Job>>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
    searches: Mutex<Vec<SearchRequest>>,
    taxes: Mutex<(f64, f64, f64)>,
}

/// Cheap to clone: every clone shares the same recorded state.
#[derive(Clone, Default)]
pub struct FakePlatform {
    state: Arc<FakeState>,
}

impl FakePlatform {
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        let fake = Self::default();
        *fake.state.jobs.lock().unwrap() = jobs;
        fake
    }

    pub fn platform(&self) -> Platform {
        let shared = Arc::new(self.clone());
        Platform {
            jobs: shared.clone(),
            applications: shared.clone(),
            job_board: shared.clone(),
            taxes: shared,
        }
    }

    /// Makes every later call named `call` fail with a remote error.
    pub fn fail_on(&self, call: &'static str) {
        self.state.failing.lock().unwrap().insert(call);
    }

    pub fn set_taxes(&self, federal: f64, social_security: f64, medicare: f64) {
        *self.state.taxes.lock().unwrap() = (federal, social_security, medicare);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<SearchRequest> {
        self.state.searches.lock().unwrap().clone()
    }

    pub fn remaining_jobs(&self) -> Vec<Job> {
        self.state.jobs.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) -> Result<(), PlatformError> {
        self.state.calls.lock().unwrap().push(call.to_string());
        if self.state.failing.lock().unwrap().contains(call) {
            return Err(PlatformError::Remote {
                status: 500,
                message: format!("{call} failed"),
            });
        }
        Ok(())
    }
}

pub fn job(id: &str, title: &str, company: &str) -> Job {
    Job {
        id: RecordId::new(id),
        title: Some(title.to_string()),
        company: Some(company.to_string()),
        location: Some("Remote".to_string()),
        job_type: Some("Full-time".to_string()),
        salary: None,
        link: Some(format!("https://jobs.example/{id}")),
    }
}

#[async_trait]
impl JobStore for FakePlatform {
    async fn query_jobs(&self) -> Result<Vec<Job>, PlatformError> {
        self.record("query_jobs")?;
        Ok(self.state.jobs.lock().unwrap().clone())
    }

    async fn delete_jobs(&self, ids: &[RecordId]) -> Result<(), PlatformError> {
        self.record("delete_jobs")?;
        self.state.jobs.lock().unwrap().retain(|j| !ids.contains(&j.id));
        Ok(())
    }

    async fn delete_all_jobs(&self) -> Result<(), PlatformError> {
        self.record("delete_all_jobs")?;
        self.state.jobs.lock().unwrap().clear();
        Ok(())
    }
}

#[async_trait]
impl ApplicationStore for FakePlatform {
    async fn upsert_job_applications(&self, _ids: &[RecordId]) -> Result<(), PlatformError> {
        self.record("upsert_job_applications")
    }
}

#[async_trait]
impl JobBoard for FakePlatform {
    async fn submit_search(&self, request: &SearchRequest) -> Result<(), PlatformError> {
        self.record("submit_search")?;
        self.state.searches.lock().unwrap().push(request.clone());
        Ok(())
    }
}

#[async_trait]
impl TaxService for FakePlatform {
    async fn federal_tax(&self, _salary: f64) -> Result<f64, PlatformError> {
        self.record("federal_tax")?;
        Ok(self.state.taxes.lock().unwrap().0)
    }

    async fn social_security_tax(&self, _salary: f64) -> Result<f64, PlatformError> {
        self.record("social_security_tax")?;
        Ok(self.state.taxes.lock().unwrap().1)
    }

    async fn medicare_tax(&self, _salary: f64) -> Result<f64, PlatformError> {
        self.record("medicare_tax")?;
        Ok(self.state.taxes.lock().unwrap().2)
    }
}
