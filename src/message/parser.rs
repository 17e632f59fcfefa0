//! Parser for edited buffers: free-form body first, then a comment/fields region.

use lazy_regex::regex_captures;
use tracing::warn;

use super::error::{MessageError, Result};
use super::fields::{Field, FieldMap};

/// Lines starting with this character open the comment/fields region.
pub const COMMENT_MARKER: char = '#';

/// Split an edited buffer into body and field updates, and merge both into `fields`.
///
/// Every line from the first comment line onward belongs to the fields region,
/// where `KEY: value` lines (upper-case key) update the matching field and
/// anything else is ignored. A field-looking line above the first comment line
/// is body text. A blank body aborts with [`MessageError::AbortedEmptyMessage`].
pub fn parse(raw: &str, fields: FieldMap) -> Result<FieldMap> {
    let (body, field_lines) = split(raw);
    if body.is_empty() {
        return Err(MessageError::AbortedEmptyMessage);
    }

    let mut fields = apply(fields, field_lines)?;
    fields.body = Field::Set(body);
    Ok(fields)
}

/// Like [`parse`], but hands back the trimmed body (possibly blank) next to
/// the merged fields, whose `body` is left as it was.
pub fn parse_allowing_blank(raw: &str, fields: FieldMap) -> Result<(String, FieldMap)> {
    let (body, field_lines) = split(raw);
    Ok((body, apply(fields, field_lines)?))
}

fn split(raw: &str) -> (String, Vec<(String, &str)>) {
    let mut body = Vec::new();
    let mut field_lines = Vec::new();
    let mut end_of_body = false;

    for line in raw.lines() {
        if !end_of_body && !line.starts_with(COMMENT_MARKER) {
            body.push(line);
            continue;
        }
        end_of_body = true;
        if let Some((_, key, value)) = regex_captures!(r"^([A-Z]+): (.*)$", line) {
            field_lines.push((key.to_lowercase(), value));
        }
    }

    (body.join("\n").trim().to_string(), field_lines)
}

fn apply(mut fields: FieldMap, field_lines: Vec<(String, &str)>) -> Result<FieldMap> {
    for (key, value) in field_lines {
        if !fields.apply_field_line(&key, value)? {
            warn!(field = %key, "Ignoring unrecognized field line");
        }
    }
    Ok(fields)
}
