use super::job::{Job, JobStatus};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

/// Read-mostly view of the processing-job registry, as consumed by the
/// resolver and the job-status endpoint.
///
/// Injected as an explicit dependency so tests can substitute fakes.
#[async_trait]
pub trait JobRegistry: Send + Sync {
    /// The completed job for this transcript id, if one exists.
    async fn find_completed_job(&self, transcript_id: &str) -> Option<Job>;

    /// Seed a placeholder job for an unknown transcript id. Idempotent:
    /// calling again for the same id returns the existing job untouched.
    async fn create_placeholder_job(&self, transcript_id: &str) -> Job;

    /// Any job for this transcript id, regardless of status.
    async fn find_job(&self, transcript_id: &str) -> Option<Job>;
}

/// Process-local registry, shared across requests.
///
/// One job per transcript id; re-submitting a transcript overwrites the
/// previous job (last write wins).
pub struct InMemoryJobRegistry {
    jobs: RwLock<HashMap<String, Job>>,
}

impl InMemoryJobRegistry {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Record a job, keyed by its transcript id. Used by the processing
    /// subsystem when a job finishes.
    pub async fn insert(&self, job: Job) {
        let mut jobs = self.jobs.write().await;
        jobs.insert(job.transcript_id.clone(), job);
    }
}

impl Default for InMemoryJobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobRegistry for InMemoryJobRegistry {
    async fn find_completed_job(&self, transcript_id: &str) -> Option<Job> {
        let jobs = self.jobs.read().await;
        jobs.get(transcript_id)
            .filter(|job| job.status == JobStatus::Completed)
            .cloned()
    }

    async fn create_placeholder_job(&self, transcript_id: &str) -> Job {
        let mut jobs = self.jobs.write().await;
        if let Some(existing) = jobs.get(transcript_id) {
            return existing.clone();
        }

        let job = Job::placeholder(transcript_id);
        info!(
            transcript_id = %transcript_id,
            job_id = %job.id,
            "Seeded placeholder job for unknown transcript"
        );
        jobs.insert(transcript_id.to_string(), job.clone());
        job
    }

    async fn find_job(&self, transcript_id: &str) -> Option<Job> {
        let jobs = self.jobs.read().await;
        jobs.get(transcript_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn placeholder_job_is_idempotent() {
        let registry = InMemoryJobRegistry::new();

        let first = registry.create_placeholder_job("t-1").await;
        let second = registry.create_placeholder_job("t-1").await;

        assert_eq!(first.id, second.id);
        assert_eq!(first.status, JobStatus::Processing);
    }

    #[tokio::test]
    async fn incomplete_job_is_not_found_as_completed() {
        let registry = InMemoryJobRegistry::new();
        registry.create_placeholder_job("t-1").await;

        assert!(registry.find_completed_job("t-1").await.is_none());
        assert!(registry.find_job("t-1").await.is_some());
    }
}
