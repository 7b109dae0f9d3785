// src/linkedin/mod.rs
use serde_json::Value;

pub mod apply;
pub mod client;
pub mod facade;
pub mod query;
pub mod session;

pub use apply::{ApplicationPayload, FieldResponse, ResponseValue};
pub use client::{EasyApplyError, JobSearchClient};
pub use facade::{BotFacade, BotState, FacadeError};
pub use query::{build_query_string, SearchFilters};
pub use session::VoyagerSession;

/// One job posting returned by a search, in arrival order.
///
/// `job_id` is the trailing segment of the entity's tracking URN; `data` is
/// the raw normalized-JSON entity for callers that need more attributes.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub job_id: String,
    pub data: Value,
}

/// One field of an easy-apply form, flattened from the form schema response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationFormField {
    /// Display title, falling back to the element URN when the response
    /// carries no title text.
    pub title: String,
    pub urn: String,
    /// The single key under the element's `formComponent` map. Behavior is
    /// undefined if a component legitimately carries multiple type keys.
    pub component_type: String,
    pub selectable_options: Option<Vec<String>>,
}
