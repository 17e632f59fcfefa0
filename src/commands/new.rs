use anyhow::bail;
use clap::Args;

use super::common::{Session, labels_field, print_output};
use crate::message::{Editor, Field, FieldMap, MessageError, Template, compose};

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct NewArgs {
    /// Issue title
    pub title: String,

    /// Issue description; opens the editor when omitted
    #[arg(short, long)]
    pub message: Option<String>,

    /// Assign the issue to this user
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Milestone number
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub milestone: Option<u64>,

    /// Labels to add
    #[arg(short, long, num_args = 1.., value_delimiter = ',')]
    pub labels: Vec<String>,
}

impl NewArgs {
    fn fields(&self) -> FieldMap {
        FieldMap {
            body: self.message.clone().into(),
            title: Field::Set(self.title.clone()),
            assignee: self.assignee.clone().into(),
            milestone: self.milestone.into(),
            labels: labels_field(&self.labels),
            ..Default::default()
        }
    }
}

pub async fn run<E: Editor>(args: &NewArgs, session: &Session<E>) -> anyhow::Result<()> {
    let output = run_with_output(args, session).await?;
    print_output(&output)
}

pub(super) async fn run_with_output<E: Editor>(
    args: &NewArgs,
    session: &Session<E>,
) -> anyhow::Result<String> {
    let fields = match &args.message {
        Some(body) if body.trim().is_empty() => return Err(MessageError::AbortedEmptyMessage.into()),
        Some(_) => args.fields(),
        None => compose(&session.editor, &Template::issue(), args.fields())?,
    };
    if fields.title.as_set().is_none_or(|title| title.trim().is_empty()) {
        bail!("Action aborted! Title is empty.");
    }

    let issue = session.client.create_issue(&session.repo, &fields).await?;
    Ok(format!("Created issue #{}: {}\n", issue.number, issue.html_url))
}
