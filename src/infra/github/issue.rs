//! Issue operations.

use reqwest::Method;
use serde_json::{Map, Value, json};
use tracing::{debug, info};

use super::client::GitHubClient;
use super::error::Result;
use super::models::Issue;
use crate::infra::git::RepoId;
use crate::message::{Field, FieldMap};

const MAX_PER_PAGE: usize = 100;

/// Query filters for listing issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilters {
    /// Milestone number, `*` or `none`.
    pub milestone: Option<String>,
    pub state: Option<String>,
    pub assignee: Option<String>,
    pub mentioned: Option<String>,
    pub labels: Vec<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    /// RFC 3339 timestamp.
    pub since: Option<String>,
    /// Maximum number of issues to return.
    pub limit: usize,
}

impl Default for ListFilters {
    fn default() -> Self {
        Self {
            milestone: None,
            state: None,
            assignee: None,
            mentioned: None,
            labels: Vec::new(),
            sort: None,
            direction: None,
            since: None,
            limit: 30,
        }
    }
}

impl ListFilters {
    fn query(&self) -> Vec<(&'static str, String)> {
        let labels = (!self.labels.is_empty()).then(|| self.labels.join(","));
        [
            ("milestone", self.milestone.clone()),
            ("state", self.state.clone()),
            ("assignee", self.assignee.clone()),
            ("mentioned", self.mentioned.clone()),
            ("labels", labels),
            ("sort", self.sort.clone()),
            ("direction", self.direction.clone()),
            ("since", self.since.clone()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

/// Whether a payload creates a new issue or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    Create,
    Update,
}

/// Build the JSON body for creating or updating an issue.
///
/// Unset fields are omitted. Cleared fields are sent as `null` (labels as `[]`)
/// when updating, and omitted when creating.
pub fn issue_payload(fields: &FieldMap, mode: PayloadMode) -> Value {
    let mut payload = Map::new();
    let mut put = |key: &str, value: Option<Value>, cleared: Value| match value {
        Some(value) => {
            payload.insert(key.to_string(), value);
        }
        None if mode == PayloadMode::Update => {
            payload.insert(key.to_string(), cleared);
        }
        None => {}
    };

    if let Some(value) = field_value(&fields.title, |t| json!(t)) {
        put("title", value, Value::Null);
    }
    if let Some(value) = field_value(&fields.body, |b| json!(b)) {
        put("body", value, Value::Null);
    }
    if let Some(value) = field_value(&fields.assignee, |a| json!([a])) {
        put("assignees", value, json!([]));
    }
    if let Some(value) = field_value(&fields.milestone, |m| json!(m)) {
        put("milestone", value, Value::Null);
    }
    if let Some(value) = field_value(&fields.labels, |l| json!(l)) {
        put("labels", value, json!([]));
    }

    Value::Object(payload)
}

/// `None` for unset, `Some(None)` for cleared, `Some(Some(json))` for set.
fn field_value<T>(field: &Field<T>, to_json: impl Fn(&T) -> Value) -> Option<Option<Value>> {
    match field {
        Field::Unset => None,
        Field::Cleared => Some(None),
        Field::Set(value) => Some(Some(to_json(value))),
    }
}

impl GitHubClient {
    /// List issues matching `filters`, skipping pull requests.
    pub async fn list_issues(&self, repo: &RepoId, filters: &ListFilters) -> Result<Vec<Issue>> {
        let url = self.repo_url(repo, "issues");
        let per_page = filters.limit.clamp(1, MAX_PER_PAGE);
        let query = filters.query();
        let mut issues = Vec::new();

        for page in 1.. {
            let request = self
                .request(Method::GET, &url)
                .query(&query)
                .query(&[("per_page", per_page), ("page", page)]);
            let batch: Vec<Issue> = self.send_json(request).await?;
            let fetched = batch.len();
            issues.extend(batch.into_iter().filter(|issue| !issue.is_pull_request()));

            if issues.len() >= filters.limit || fetched < per_page {
                break;
            }
        }

        issues.truncate(filters.limit);
        debug!(count = issues.len(), "Listed issues");
        Ok(issues)
    }

    pub async fn get_issue(&self, repo: &RepoId, number: u64) -> Result<Issue> {
        let url = self.repo_url(repo, &format!("issues/{number}"));
        self.send_json(self.request(Method::GET, &url)).await
    }

    /// Create an issue from `fields`. `title` must be set.
    pub async fn create_issue(&self, repo: &RepoId, fields: &FieldMap) -> Result<Issue> {
        let url = self.repo_url(repo, "issues");
        let payload = issue_payload(fields, PayloadMode::Create);
        let issue: Issue = self
            .send_json(self.request(Method::POST, &url).json(&payload))
            .await?;
        info!(number = issue.number, "Created issue");
        Ok(issue)
    }

    /// Update only the attributes of `fields` that are not unset.
    pub async fn update_issue(&self, repo: &RepoId, number: u64, fields: &FieldMap) -> Result<Issue> {
        let url = self.repo_url(repo, &format!("issues/{number}"));
        let payload = issue_payload(fields, PayloadMode::Update);
        let issue: Issue = self
            .send_json(self.request(Method::PATCH, &url).json(&payload))
            .await?;
        info!(number, "Updated issue");
        Ok(issue)
    }
}
