//! Editor-mediated structured messages.
//!
//! A command renders its current fields into a [`Template`], lets the user edit
//! the result in their editor, and parses the edited buffer back into a
//! [`FieldMap`]:
//!
//! 1. [`Template::render`] fills the body and the trailing `KEY: value` lines
//! 2. [`Editor::edit`] runs one blocking round-trip through a temporary buffer
//! 3. [`parse`] splits body from fields and aborts on a blank body

mod editor;
mod error;
mod fields;
mod parser;
mod template;
#[cfg(test)]
pub mod testing;

pub use editor::{Editor, ExternalEditor};
pub use error::MessageError;
pub use fields::{Field, FieldMap, FieldName};
pub use template::Template;

use error::Result;
use parser::{parse, parse_allowing_blank};

/// Run one render → edit → parse round-trip.
///
/// On success the returned map has a non-empty `body`; the caller decides what
/// to send. Nothing is returned when the user leaves the body blank or the
/// editor fails.
pub fn compose(editor: &impl Editor, template: &Template, fields: FieldMap) -> Result<FieldMap> {
    let initial = template.render(&fields)?;
    let edited = editor.edit(&initial)?;
    parse(&edited, fields)
}

/// The fields an untouched editor session would hand back for `fields`.
///
/// Edits are diffed against this instead of `fields` so that saving without
/// changes never counts as an update. Fails with
/// [`MessageError::UneditableBody`] when the current body would not come back
/// as it is, apart from surrounding whitespace.
pub fn baseline(template: &Template, fields: &FieldMap) -> Result<FieldMap> {
    let rendered = template.render(fields)?;
    let (body, mut baseline) = parse_allowing_blank(&rendered, fields.clone())?;

    if let Field::Set(current) = &fields.body {
        if body != current.trim() {
            return Err(MessageError::UneditableBody);
        }
        baseline.body = Field::Set(body);
    }
    Ok(baseline)
}
