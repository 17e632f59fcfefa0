//! Fixed-structure templates shown in the editor.

use indoc::indoc;
use lazy_regex::regex;

use super::error::{MessageError, Result};
use super::fields::{FieldMap, FieldName};

const ISSUE: &str = indoc! {"
    {body}
    # Please enter or edit a description for the issue above. You may use
    # Markdown to format your text. Lines starting with '#' are ignored,
    # and a blank description aborts the action. To edit other attributes
    # of the issue, edit the text after each colon below:
    TITLE: {title}
    ASSIGNEE: {assignee}
    MILESTONE: {milestone}
    LABELS: {labels}"};

const COMMENT: &str = indoc! {"
    {body}
    # Please enter a comment for issue #{issue} above. You may use Markdown
    # to format your text. Lines starting with '#' are ignored, and a blank
    # comment aborts the action."};

const DESCRIPTION: &str = indoc! {"
    {body}
    # Please edit the description of issue #{issue} above. You may use
    # Markdown to format your text. Lines starting with '#' are ignored,
    # and a blank description aborts the action."};

/// A text pattern with `{name}` placeholders for [`FieldMap`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    text: &'static str,
}

impl Template {
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    /// Description plus title, assignee, milestone and labels.
    pub const fn issue() -> Self {
        Self::new(ISSUE)
    }

    /// Comment body on issue `{issue}`.
    pub const fn comment() -> Self {
        Self::new(COMMENT)
    }

    /// Description of issue `{issue}` only.
    pub const fn description() -> Self {
        Self::new(DESCRIPTION)
    }

    /// Substitute every placeholder with the field's current value.
    pub fn render(&self, fields: &FieldMap) -> Result<String> {
        let mut rendered = String::with_capacity(self.text.len());
        let mut last = 0;

        for caps in regex!(r"\{([a-z_]+)\}").captures_iter(self.text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let field = FieldName::parse(name.as_str())
                .ok_or_else(|| MessageError::MissingPlaceholder(name.as_str().to_string()))?;

            rendered.push_str(&self.text[last..whole.start()]);
            rendered.push_str(&fields.display_value(field));
            last = whole.end();
        }

        rendered.push_str(&self.text[last..]);
        Ok(rendered)
    }
}
