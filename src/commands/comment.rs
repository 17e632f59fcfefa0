use anyhow::bail;
use chrono::{DateTime, Utc};
use clap::{ArgGroup, Args};

use super::common::{Session, print_output, write_text_change};
use super::show::{format_comment, format_comments};
use crate::message::{Editor, Field, FieldMap, MessageError, Template, baseline, compose};

#[derive(Args, Clone, PartialEq, Eq, Debug)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args(["list", "show", "new", "edit", "delete"])
))]
pub struct CommentArgs {
    /// List the comments on an issue
    #[arg(short, long, value_name = "ISSUE")]
    pub list: Option<u64>,

    /// Show a comment
    #[arg(short, long, value_name = "COMMENT")]
    pub show: Option<u64>,

    /// Add a comment to an issue
    #[arg(short, long, value_name = "ISSUE")]
    pub new: Option<u64>,

    /// Edit a comment
    #[arg(short, long, value_name = "COMMENT")]
    pub edit: Option<u64>,

    /// Delete a comment
    #[arg(short, long, value_name = "COMMENT")]
    pub delete: Option<u64>,

    /// Comment text for --new or --edit; opens the editor when omitted
    #[arg(short, long, conflicts_with_all = ["list", "show", "delete"])]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentAction {
    List { issue: u64 },
    Show { comment: u64 },
    New { issue: u64 },
    Edit { comment: u64 },
    Delete { comment: u64 },
}

impl CommentArgs {
    fn action(&self) -> anyhow::Result<CommentAction> {
        let action = match (self.list, self.show, self.new, self.edit, self.delete) {
            (Some(issue), ..) => CommentAction::List { issue },
            (_, Some(comment), ..) => CommentAction::Show { comment },
            (_, _, Some(issue), ..) => CommentAction::New { issue },
            (.., Some(comment), _) => CommentAction::Edit { comment },
            (.., Some(comment)) => CommentAction::Delete { comment },
            _ => bail!("One of --list, --show, --new, --edit or --delete is required"),
        };
        Ok(action)
    }

    /// Body given with `-m`; a blank one aborts like a blank editor buffer.
    fn message(&self) -> Result<Option<&str>, MessageError> {
        match self.message.as_deref() {
            Some(body) if body.trim().is_empty() => Err(MessageError::AbortedEmptyMessage),
            other => Ok(other),
        }
    }
}

pub async fn run<E: Editor>(args: &CommentArgs, session: &Session<E>) -> anyhow::Result<()> {
    let output = run_with_output(args, session, Utc::now()).await?;
    match args.action()? {
        CommentAction::List { .. } => session.page(&output),
        _ => print_output(&output),
    }
}

pub(super) async fn run_with_output<E: Editor>(
    args: &CommentArgs,
    session: &Session<E>,
    now: DateTime<Utc>,
) -> anyhow::Result<String> {
    let client = &session.client;
    let repo = &session.repo;

    match args.action()? {
        CommentAction::List { issue } => {
            let comments = client.list_comments(repo, issue).await?;
            if comments.is_empty() {
                return Ok(format!("No comments on issue #{issue}.\n"));
            }
            Ok(format_comments(&comments, now))
        }
        CommentAction::Show { comment } => {
            let comment = client.get_comment(repo, comment).await?;
            Ok(format!("{}\n{}", comment.html_url, format_comment(&comment, now)))
        }
        CommentAction::New { issue } => {
            let body = match args.message()? {
                Some(body) => body.to_string(),
                None => {
                    let fields = FieldMap {
                        issue: Some(issue),
                        ..Default::default()
                    };
                    composed_body(compose(&session.editor, &Template::comment(), fields)?)
                }
            };
            let comment = client.create_comment(repo, issue, &body).await?;
            Ok(format!(
                "Created comment {} on issue #{issue}: {}\n",
                comment.id, comment.html_url
            ))
        }
        CommentAction::Edit { comment: id } => {
            let comment = client.get_comment(repo, id).await?;
            let body = match args.message()? {
                Some(body) => body.to_string(),
                None => {
                    let fields = FieldMap {
                        body: Field::Set(comment.body.clone()),
                        issue: comment.issue_number(),
                        comment: Some(id),
                        ..Default::default()
                    };
                    let template = Template::comment();
                    baseline(&template, &fields)?;
                    composed_body(compose(&session.editor, &template, fields)?)
                }
            };
            if body == comment.body.trim() {
                return Ok(format!("No changes to comment {id}.\n"));
            }

            let mut out = Vec::new();
            write_text_change(&mut out, &comment.body, &body, session.color)?;
            let updated = client.update_comment(repo, id, &body).await?;
            let mut output = String::from_utf8_lossy(&out).into_owned();
            output.push_str(&format!("Updated comment {id}: {}\n", updated.html_url));
            Ok(output)
        }
        CommentAction::Delete { comment } => {
            client.delete_comment(repo, comment).await?;
            Ok(format!("Deleted comment {comment}.\n"))
        }
    }
}

fn composed_body(fields: FieldMap) -> String {
    match fields.body {
        Field::Set(body) => body,
        Field::Unset | Field::Cleared => String::new(),
    }
}
