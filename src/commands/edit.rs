use anyhow::bail;
use clap::Args;

use super::common::{
    Session, labels_field, parse_milestone, print_output, text_arg, write_field_change,
    write_text_change,
};
use crate::message::{
    Editor, Field, FieldMap, FieldName, MessageError, Template, baseline, compose,
};

/// Attributes shown as `-KEY: old` / `+KEY: new` after an edit.
const SINGLE_LINE_FIELDS: [(FieldName, &str); 4] = [
    (FieldName::Title, "TITLE"),
    (FieldName::Assignee, "ASSIGNEE"),
    (FieldName::Milestone, "MILESTONE"),
    (FieldName::Labels, "LABELS"),
];

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct EditArgs {
    /// Issue number
    pub issue: u64,

    /// New description
    #[arg(short, long, conflicts_with = "edit")]
    pub message: Option<String>,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New assignee ("none" to unassign)
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// New milestone number ("none" to remove it)
    #[arg(long, value_parser = parse_milestone)]
    pub milestone: Option<Field<u64>>,

    /// Replace the labels ("none" to remove them all)
    #[arg(short, long, num_args = 1.., value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Edit the description in the editor
    #[arg(short, long)]
    pub edit: bool,
}

impl EditArgs {
    fn fields(&self) -> FieldMap {
        FieldMap {
            body: self.message.clone().into(),
            title: self.title.clone().into(),
            assignee: text_arg(self.assignee.as_deref()),
            milestone: self.milestone.clone().unwrap_or_default(),
            labels: labels_field(&self.labels),
            issue: Some(self.issue),
            comment: None,
        }
    }
}

pub async fn run<E: Editor>(args: &EditArgs, session: &Session<E>) -> anyhow::Result<()> {
    let output = run_with_output(args, session).await?;
    print_output(&output)
}

pub(super) async fn run_with_output<E: Editor>(
    args: &EditArgs,
    session: &Session<E>,
) -> anyhow::Result<String> {
    let issue = session.client.get_issue(&session.repo, args.issue).await?;
    let original = issue.to_fields();
    let requested = args.fields();

    let (base, edited) = if args.edit {
        let template = Template::description();
        let base = baseline(&template, &original)?;
        let composed = compose(&session.editor, &template, original.clone())?;
        let edited = FieldMap {
            body: composed.body,
            ..requested
        };
        (base, edited)
    } else if requested.has_no_updates() {
        let template = Template::issue();
        let base = baseline(&template, &original)?;
        (base, compose(&session.editor, &template, original.clone())?)
    } else {
        if requested
            .body
            .as_set()
            .is_some_and(|body| body.trim().is_empty())
        {
            return Err(MessageError::AbortedEmptyMessage.into());
        }
        (original.clone(), requested)
    };

    if edited.title == Field::Cleared
        || edited.title.as_set().is_some_and(|t| t.trim().is_empty())
    {
        bail!("Action aborted! Title is empty.");
    }

    let changes = edited.changes_from(&base);
    if changes.has_no_updates() {
        return Ok(format!("No changes to issue #{}.\n", args.issue));
    }

    let mut out = Vec::new();
    write_changes(&mut out, &original, &changes, session.color)?;
    let updated = session
        .client
        .update_issue(&session.repo, args.issue, &changes)
        .await?;

    let mut output = String::from_utf8_lossy(&out).into_owned();
    output.push_str(&format!(
        "Updated issue #{}: {}\n",
        updated.number, updated.html_url
    ));
    Ok(output)
}

/// Diff of the description, then one `-`/`+` pair per other changed attribute.
fn write_changes(
    out: &mut Vec<u8>,
    original: &FieldMap,
    changes: &FieldMap,
    use_color: bool,
) -> std::io::Result<()> {
    if !changes.body.is_unset() {
        write_text_change(
            out,
            &original.display_value(FieldName::Body),
            &changes.display_value(FieldName::Body),
            use_color,
        )?;
    }

    for (name, key) in SINGLE_LINE_FIELDS {
        let changed = match name {
            FieldName::Title => !changes.title.is_unset(),
            FieldName::Assignee => !changes.assignee.is_unset(),
            FieldName::Milestone => !changes.milestone.is_unset(),
            FieldName::Labels => !changes.labels.is_unset(),
            _ => false,
        };
        if changed {
            write_field_change(
                out,
                key,
                &original.display_value(name),
                &changes.display_value(name),
                use_color,
            )?;
        }
    }
    Ok(())
}
