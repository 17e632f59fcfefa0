use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use tracing::info;

use super::common::{Session, print_output};
use super::format::{format_relative_time, format_state, indent_text};
use crate::infra::github::{Comment, Issue, WithAuthor};
use crate::message::Editor;

const SEPARATOR: &str = "──────────────────────────────────────────────────────";

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct ShowArgs {
    /// Issue number
    pub issue: u64,

    /// Open the issue in the web browser
    #[arg(short, long)]
    pub web: bool,
}

pub async fn run<E: Editor>(args: &ShowArgs, session: &Session<E>) -> anyhow::Result<()> {
    if args.web {
        let issue = session.client.get_issue(&session.repo, args.issue).await?;
        info!(url = %issue.html_url, "Opening issue in browser");
        open::that(&issue.html_url)
            .with_context(|| format!("Failed to open {} in a browser", issue.html_url))?;
        return print_output(&format!("Opening {} in your browser.\n", issue.html_url));
    }

    let output = run_with_output(args, session, Utc::now()).await?;
    session.page(&output)
}

pub(super) async fn run_with_output<E: Editor>(
    args: &ShowArgs,
    session: &Session<E>,
    now: DateTime<Utc>,
) -> anyhow::Result<String> {
    let issue = session.client.get_issue(&session.repo, args.issue).await?;
    let comments = session
        .client
        .list_comments(&session.repo, args.issue)
        .await?;

    let mut output = format_issue(&issue, comments.len(), now);
    output.push_str(&format_comments(&comments, now));
    Ok(output)
}

fn format_issue(issue: &Issue, comment_count: usize, now: DateTime<Utc>) -> String {
    let mut output = format!("{} #{}\n\n", issue.title, issue.number);

    output.push_str(&format!(
        "{} • {} opened {} • {} comment{}\n",
        format_state(&issue.state),
        issue.author_login(),
        format_relative_time(issue.created_at, now),
        comment_count,
        if comment_count == 1 { "" } else { "s" }
    ));

    if !issue.labels.is_empty() {
        output.push_str(&format!("Labels: {}\n", issue.label_names().join(", ")));
    }
    if !issue.assignees.is_empty() {
        let assignees: Vec<&str> = issue.assignees.iter().map(|a| a.login.as_str()).collect();
        output.push_str(&format!("Assignees: {}\n", assignees.join(", ")));
    }
    if let Some(milestone) = &issue.milestone {
        output.push_str(&format!(
            "Milestone: {} (#{})\n",
            milestone.title, milestone.number
        ));
    }

    output.push('\n');
    match issue.body.as_deref().filter(|b| !b.trim().is_empty()) {
        Some(body) => output.push_str(&format!("{}\n", indent_text(body, "  "))),
        None => output.push_str("  No description provided.\n"),
    }
    output
}

/// Every comment, each preceded by a separator line.
pub(super) fn format_comments(comments: &[Comment], now: DateTime<Utc>) -> String {
    comments
        .iter()
        .map(|comment| format!("\n{SEPARATOR}\n\n{}", format_comment(comment, now)))
        .collect()
}

/// Author line, then the indented body.
pub(super) fn format_comment(comment: &Comment, now: DateTime<Utc>) -> String {
    let edited = if comment.is_edited() { " • edited" } else { "" };
    format!(
        "{} • {}{} • comment {}\n\n{}\n",
        comment.author_login(),
        format_relative_time(comment.created_at, now),
        edited,
        comment.id,
        indent_text(&comment.body, "  ")
    )
}
