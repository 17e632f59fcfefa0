//! Editable attributes of an issue or comment.

use super::error::{MessageError, Result};

/// Tri-state value of one editable attribute.
///
/// `Unset` leaves the remote value alone (or lets the server pick a default on
/// create), `Cleared` removes it, `Set` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Unset,
    Cleared,
    Set(T),
}

impl<T> Field<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Set)
    }
}

/// Names usable as template placeholders and as `KEY:` lines in an edited buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    Body,
    Title,
    Assignee,
    Milestone,
    Labels,
    Issue,
    Comment,
}

impl FieldName {
    /// Look up a lower-case field name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "body" => Some(Self::Body),
            "title" => Some(Self::Title),
            "assignee" => Some(Self::Assignee),
            "milestone" => Some(Self::Milestone),
            "labels" => Some(Self::Labels),
            "issue" => Some(Self::Issue),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Title => "title",
            Self::Assignee => "assignee",
            Self::Milestone => "milestone",
            Self::Labels => "labels",
            Self::Issue => "issue",
            Self::Comment => "comment",
        }
    }
}

/// Field values of one issue or comment, owned by the command that edits it.
///
/// `issue` and `comment` are identifiers shown in templates; they are never
/// updated from an edited buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    pub body: Field<String>,
    pub title: Field<String>,
    pub assignee: Field<String>,
    pub milestone: Field<u64>,
    pub labels: Field<Vec<String>>,
    pub issue: Option<u64>,
    pub comment: Option<u64>,
}

impl FieldMap {
    /// Text shown for a field when rendering a template. Unset and cleared
    /// fields render as an empty string.
    pub fn display_value(&self, name: FieldName) -> String {
        match name {
            FieldName::Body => display_text(&self.body),
            FieldName::Title => display_text(&self.title),
            FieldName::Assignee => display_text(&self.assignee),
            FieldName::Milestone => self
                .milestone
                .as_set()
                .map(u64::to_string)
                .unwrap_or_default(),
            FieldName::Labels => self
                .labels
                .as_set()
                .map(|labels| labels.join(" "))
                .unwrap_or_default(),
            FieldName::Issue => self.issue.map(|n| n.to_string()).unwrap_or_default(),
            FieldName::Comment => self.comment.map(|n| n.to_string()).unwrap_or_default(),
        }
    }

    /// Apply a `KEY: value` line from the fields region of an edited buffer.
    ///
    /// `key` must already be lower-cased. Returns `false` when the key does not
    /// name an editable attribute and the line was ignored.
    pub fn apply_field_line(&mut self, key: &str, value: &str) -> Result<bool> {
        match FieldName::parse(key) {
            Some(FieldName::Title) => self.title = text_field(value),
            Some(FieldName::Assignee) => self.assignee = text_field(value),
            Some(FieldName::Milestone) => self.milestone = milestone_field(value)?,
            Some(FieldName::Labels) => {
                let labels: Vec<String> = value.split_whitespace().map(str::to_string).collect();
                self.labels = if labels.is_empty() {
                    Field::Cleared
                } else {
                    Field::Set(labels)
                };
            }
            Some(FieldName::Body | FieldName::Issue | FieldName::Comment) | None => {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// True when none of the editable attributes carries an update.
    pub fn has_no_updates(&self) -> bool {
        self.body.is_unset()
            && self.title.is_unset()
            && self.assignee.is_unset()
            && self.milestone.is_unset()
            && self.labels.is_unset()
    }

    /// Keep only the attributes that differ from `original`.
    ///
    /// Labels are compared as sets. Identifiers are copied from `self`.
    pub fn changes_from(&self, original: &FieldMap) -> FieldMap {
        let sorted = |labels: &Field<Vec<String>>| match labels {
            Field::Set(values) => {
                let mut values = values.clone();
                values.sort();
                values.dedup();
                Field::Set(values)
            }
            other => other.clone(),
        };
        let labels = if sorted(&self.labels) == sorted(&original.labels) {
            Field::Unset
        } else {
            self.labels.clone()
        };

        FieldMap {
            body: changed(&self.body, &original.body),
            title: changed(&self.title, &original.title),
            assignee: changed(&self.assignee, &original.assignee),
            milestone: changed(&self.milestone, &original.milestone),
            labels,
            issue: self.issue,
            comment: self.comment,
        }
    }
}

fn changed<T: Clone + PartialEq>(new: &Field<T>, old: &Field<T>) -> Field<T> {
    if new == old {
        Field::Unset
    } else {
        new.clone()
    }
}

fn display_text(field: &Field<String>) -> String {
    field.as_set().cloned().unwrap_or_default()
}

fn text_field(value: &str) -> Field<String> {
    if value.trim().is_empty() {
        Field::Cleared
    } else {
        Field::Set(value.to_string())
    }
}

fn milestone_field(value: &str) -> Result<Field<u64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(Field::Cleared);
    }
    match trimmed.parse::<u64>() {
        Ok(number) if number > 0 => Ok(Field::Set(number)),
        _ => Err(MessageError::InvalidField {
            field: FieldName::Milestone.as_str(),
            value: value.to_string(),
        }),
    }
}
