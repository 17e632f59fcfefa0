use chrono::{DateTime, SecondsFormat, Utc};
use clap::{Args, ValueEnum};

use super::common::Session;
use crate::infra::github::{Issue, ListFilters};
use crate::message::Editor;
use crate::shared::table::Table;

const MAX_COLUMN_WIDTH: usize = 60;

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum StateFilter {
    Open,
    Closed,
    All,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SortKey {
    Created,
    Updated,
    Comments,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct ListArgs {
    /// Only issues in this milestone (number, "*" for any, "none" for none)
    #[arg(short, long)]
    pub milestone: Option<String>,

    /// Issue state
    #[arg(long, value_enum, default_value_t = StateFilter::Open)]
    pub state: StateFilter,

    /// Only issues assigned to this user ("none" for unassigned)
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Only issues mentioning this user
    #[arg(short = '@', long)]
    pub mentioned: Option<String>,

    /// Only issues with all of these labels
    #[arg(short, long, num_args = 1.., value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Sort order
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,

    /// Sort direction
    #[arg(short, long, value_enum)]
    pub direction: Option<Direction>,

    /// Only issues updated at or after this time (ISO 8601, e.g. 2024-01-31T12:00:00Z)
    #[arg(long, value_parser = parse_since)]
    pub since: Option<String>,

    /// Maximum number of issues to show
    #[arg(long, default_value_t = 30)]
    pub limit: usize,
}

impl ListArgs {
    fn filters(&self) -> ListFilters {
        ListFilters {
            milestone: self.milestone.clone(),
            state: Some(value_name(self.state)),
            assignee: self.assignee.clone(),
            mentioned: self.mentioned.clone(),
            labels: self.labels.clone(),
            sort: self.sort.map(value_name),
            direction: self.direction.map(value_name),
            since: self.since.clone(),
            limit: self.limit,
        }
    }
}

fn value_name(value: impl ValueEnum) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

/// Validate an RFC 3339 timestamp and normalize it to UTC.
fn parse_since(value: &str) -> Result<String, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| {
            at.with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        })
        .map_err(|e| format!("expected an ISO 8601 timestamp like 2024-01-31T12:00:00Z: {e}"))
}

pub async fn run<E: Editor>(args: &ListArgs, session: &Session<E>) -> anyhow::Result<()> {
    let output = run_with_output(args, session).await?;
    session.page(&output)
}

pub(super) async fn run_with_output<E: Editor>(
    args: &ListArgs,
    session: &Session<E>,
) -> anyhow::Result<String> {
    let issues = session
        .client
        .list_issues(&session.repo, &args.filters())
        .await?;
    Ok(format_issue_table(&issues))
}

fn format_issue_table(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return "No issues found.\n".to_string();
    }

    let mut table = Table::new(MAX_COLUMN_WIDTH);
    for issue in issues {
        table.push_row([
            format!("#{}", issue.number),
            issue.state.clone(),
            issue.title.clone(),
            issue.label_names().join(", "),
        ]);
    }
    table.render()
}
