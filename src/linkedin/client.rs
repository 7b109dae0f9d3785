// src/linkedin/client.rs
//! Job search and easy-apply client over an authenticated Voyager session.

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::apply::{ApplicationPayload, FieldResponse};
use super::query::{build_query_string, SearchFilters};
use super::session::VoyagerSession;
use super::{ApplicationFormField, JobRecord};

/// Server-defined page size cap for job search requests.
pub const MAX_SEARCH_COUNT: usize = 49;
/// Guard against endless near-empty pages.
pub const MAX_REPEATED_REQUESTS: usize = 200;

const JOB_POSTING_TYPE: &str = "com.linkedin.voyager.dash.jobs.JobPosting";
const SEARCH_DECORATION_ID: &str =
    "com.linkedin.voyager.dash.deco.jobs.search.JobSearchCardsCollection-174";
const APPLY_DECORATION_ID: &str =
    "com.linkedin.voyager.dash.deco.jobs.OnsiteApplyApplication-67";

/// Outcome of an easy-apply field fetch, distinguishing "already applied"
/// and fetch failures from a legitimately empty form.
#[derive(Debug, Error)]
pub enum EasyApplyError {
    #[error("already applied to job {job_id}")]
    AlreadyApplied { job_id: String },

    #[error("field fetch for job {job_id} returned HTTP {status}")]
    Status {
        job_id: String,
        status: reqwest::StatusCode,
    },

    #[error("field fetch for job {job_id} returned a malformed body")]
    MalformedBody {
        job_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("field fetch request failed")]
    Transport(#[from] reqwest::Error),

    #[error("session is missing the JSESSIONID cookie")]
    MissingCsrfToken,
}

pub struct JobSearchClient {
    session: VoyagerSession,
    applied_jobs: HashSet<String>,
}

impl JobSearchClient {
    pub fn new(session: VoyagerSession) -> Self {
        Self {
            session,
            applied_jobs: HashSet::new(),
        }
    }

    /// Search job postings matching `filters`, paginating until the limit is
    /// reached or the service signals exhaustion.
    ///
    /// Returns records in arrival order; an empty vec means no matches.
    /// Transport and non-success HTTP errors propagate unmodified, with no
    /// internal retry.
    pub async fn search_jobs(&self, filters: &SearchFilters) -> Result<Vec<JobRecord>> {
        let query_string = build_query_string(filters);
        let mut count = MAX_SEARCH_COUNT;
        let mut results: Vec<JobRecord> = Vec::new();

        loop {
            if filters.limit > -1 {
                let remaining = (filters.limit as usize).saturating_sub(results.len());
                if remaining < count {
                    count = remaining;
                }
            }

            let path = format!(
                "/voyagerJobsDashJobCards?decorationId={SEARCH_DECORATION_ID}&count={count}&q=jobSearch&query={query_string}&start={}",
                results.len() + filters.offset
            );

            let response = self
                .session
                .get(&path)
                .send()
                .await
                .context("Job search request failed")?;

            let status = response.status();
            if !status.is_success() {
                anyhow::bail!("Job search returned HTTP {status}");
            }

            let data: Value = response
                .json()
                .await
                .context("Failed to parse job search response")?;

            let elements = data
                .get("included")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();

            let mut new_jobs = Vec::new();
            for element in &elements {
                if element.get("$type").and_then(Value::as_str) != Some(JOB_POSTING_TYPE) {
                    continue;
                }
                let Some(job_id) = element
                    .get("trackingUrn")
                    .and_then(Value::as_str)
                    .and_then(|urn| urn.rsplit(':').next())
                else {
                    continue;
                };
                new_jobs.push(JobRecord {
                    job_id: job_id.to_string(),
                    data: element.clone(),
                });
            }

            if new_jobs.is_empty() {
                break;
            }
            results.extend(new_jobs);
            debug!("job search results grew to {}", results.len());

            if (filters.limit > -1 && results.len() as i64 >= filters.limit)
                || results.len() / count >= MAX_REPEATED_REQUESTS
                || elements.is_empty()
            {
                break;
            }
        }

        Ok(results)
    }

    /// Fetch and flatten the form schema required for an in-app application
    /// to the given job.
    pub async fn easy_apply_fields(
        &self,
        job_id: &str,
    ) -> Result<Vec<ApplicationFormField>, EasyApplyError> {
        let response = self.apply_request(job_id)?.send().await?;

        let status = response.status();
        match status.as_u16() {
            200 => {}
            409 => {
                warn!("job {job_id}: already applied, skipping field fetch");
                return Err(EasyApplyError::AlreadyApplied {
                    job_id: job_id.to_string(),
                });
            }
            _ => {
                error!("job {job_id}: field fetch failed with HTTP {status}");
                return Err(EasyApplyError::Status {
                    job_id: job_id.to_string(),
                    status,
                });
            }
        }

        let data: Value = response.json().await.map_err(|source| {
            error!("job {job_id}: failed to parse field fetch response");
            EasyApplyError::MalformedBody {
                job_id: job_id.to_string(),
                source,
            }
        })?;

        let mut fields = Vec::new();
        for item in data
            .get("included")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            let Some(component) = item.get("formComponent").and_then(Value::as_object) else {
                continue;
            };
            let Some((component_type, details)) = component.iter().next() else {
                continue;
            };

            let urn = item
                .get("urn")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let title = item
                .get("title")
                .and_then(|t| t.get("text"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| urn.clone());

            fields.push(ApplicationFormField {
                title,
                urn,
                component_type: component_type.clone(),
                selectable_options: flatten_options(details),
            });
        }

        Ok(fields)
    }

    /// Submit a filled application for the given job.
    ///
    /// Builds the payload from the field responses and reports success or
    /// failure from the remote service's response.
    pub async fn apply_to_job(
        &self,
        job_id: &str,
        responses: &[FieldResponse],
        follow_company: bool,
    ) -> Result<()> {
        let payload = ApplicationPayload::build(responses, follow_company);

        let response = self
            .apply_request_post(job_id)?
            .json(&payload)
            .send()
            .await
            .context("Application submit request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("job {job_id}: application submit failed with HTTP {status}");
            anyhow::bail!("Application submit returned HTTP {status}: {body}");
        }

        debug!("job {job_id}: application submitted");
        Ok(())
    }

    /// Record a job as applied in this client's process-lifetime set.
    pub fn set_job_as_applied(&mut self, job_id: &str) {
        self.applied_jobs.insert(job_id.to_string());
    }

    pub fn is_job_applied(&self, job_id: &str) -> bool {
        self.applied_jobs.contains(job_id)
    }

    pub fn applied_jobs(&self) -> &HashSet<String> {
        &self.applied_jobs
    }

    fn apply_path(job_id: &str) -> String {
        format!(
            "/voyagerJobsDashOnsiteApplyApplication?decorationId={APPLY_DECORATION_ID}&jobPostingUrn=urn%3Ali%3Afsd_jobPosting%3A{job_id}&q=jobPosting"
        )
    }

    fn apply_request(&self, job_id: &str) -> Result<reqwest::RequestBuilder, EasyApplyError> {
        let csrf = self
            .session
            .csrf_token()
            .ok_or(EasyApplyError::MissingCsrfToken)?;
        Ok(self
            .session
            .get(&Self::apply_path(job_id))
            .header("csrf-token", csrf)
            .header("Connection", "keep-alive"))
    }

    fn apply_request_post(&self, job_id: &str) -> Result<reqwest::RequestBuilder> {
        let csrf = self
            .session
            .csrf_token()
            .context("Session is missing the JSESSIONID cookie")?;
        Ok(self
            .session
            .post(&Self::apply_path(job_id))
            .header("csrf-token", csrf)
            .header("Connection", "keep-alive"))
    }
}

fn flatten_options(details: &Value) -> Option<Vec<String>> {
    if let Some(options) = details.get("textSelectableOptions").and_then(Value::as_array) {
        return Some(
            options
                .iter()
                .filter_map(|option| {
                    option
                        .get("optionText")
                        .and_then(|t| t.get("text"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .collect(),
        );
    }
    if let Some(options) = details.get("selectableOptions").and_then(Value::as_array) {
        return Some(
            options
                .iter()
                .filter_map(|option| {
                    option
                        .get("textSelectableOption")
                        .and_then(|o| o.get("optionText"))
                        .and_then(|t| t.get("text"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .collect(),
        );
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_options_direct_shape() {
        let details = json!({
            "textSelectableOptions": [
                {"optionText": {"text": "Yes"}},
                {"optionText": {"text": "No"}}
            ]
        });
        assert_eq!(
            flatten_options(&details),
            Some(vec!["Yes".to_string(), "No".to_string()])
        );
    }

    #[test]
    fn test_flatten_options_wrapped_shape() {
        let details = json!({
            "selectableOptions": [
                {"textSelectableOption": {"optionText": {"text": "Yes"}}},
                {"textSelectableOption": {"optionText": {"text": "No"}}}
            ]
        });
        assert_eq!(
            flatten_options(&details),
            Some(vec!["Yes".to_string(), "No".to_string()])
        );
    }

    #[test]
    fn test_flatten_options_shapes_agree() {
        let direct = json!({
            "textSelectableOptions": [{"optionText": {"text": "Maybe"}}]
        });
        let wrapped = json!({
            "selectableOptions": [
                {"textSelectableOption": {"optionText": {"text": "Maybe"}}}
            ]
        });
        assert_eq!(flatten_options(&direct), flatten_options(&wrapped));
    }

    #[test]
    fn test_flatten_options_absent() {
        assert_eq!(flatten_options(&json!({"text": {}})), None);
    }

    #[test]
    fn test_applied_set_is_per_instance() {
        let cookies = [("JSESSIONID".to_string(), "\"ajax:1\"".to_string())]
            .into_iter()
            .collect();
        let mut first = JobSearchClient::new(VoyagerSession::new(cookies).expect("session"));

        let cookies = [("JSESSIONID".to_string(), "\"ajax:2\"".to_string())]
            .into_iter()
            .collect();
        let second = JobSearchClient::new(VoyagerSession::new(cookies).expect("session"));

        first.set_job_as_applied("4013860791");
        assert!(first.is_job_applied("4013860791"));
        assert!(!second.is_job_applied("4013860791"));
    }
}
