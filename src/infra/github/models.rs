//! REST models for issues and comments.
//!
//! Only the fields the commands read are modelled; everything else in the
//! response is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::{Field, FieldMap};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub login: String,
}

/// Trait for types that have an optional author field.
pub trait WithAuthor {
    fn author(&self) -> Option<&Author>;

    fn author_login(&self) -> &str {
        self.author().map(|a| a.login.as_str()).unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub state: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub assignees: Vec<Author>,
    pub milestone: Option<Milestone>,
    pub user: Option<Author>,
    #[serde(default)]
    pub comments: u64,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present only when the issue is a pull request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.name.clone()).collect()
    }

    /// Current editable attributes, as they would be shown in the issue template.
    pub fn to_fields(&self) -> FieldMap {
        FieldMap {
            body: present(self.body.clone().filter(|b| !b.trim().is_empty())),
            title: Field::Set(self.title.clone()),
            assignee: present(self.assignees.first().map(|a| a.login.clone())),
            milestone: present(self.milestone.as_ref().map(|m| m.number)),
            labels: present(Some(self.label_names()).filter(|l| !l.is_empty())),
            issue: Some(self.number),
            comment: None,
        }
    }
}

/// A value the remote does not have is cleared, not unset.
fn present<T>(value: Option<T>) -> Field<T> {
    value.map_or(Field::Cleared, Field::Set)
}

impl WithAuthor for Issue {
    fn author(&self) -> Option<&Author> {
        self.user.as_ref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub body: String,
    pub user: Option<Author>,
    pub html_url: String,
    pub issue_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Number of the issue this comment belongs to, from the trailing segment of `issue_url`.
    pub fn issue_number(&self) -> Option<u64> {
        self.issue_url.rsplit('/').next()?.parse().ok()
    }

    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

impl WithAuthor for Comment {
    fn author(&self) -> Option<&Author> {
        self.user.as_ref()
    }
}
