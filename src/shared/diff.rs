//! Line diffs for showing what an edit changed.

use std::io::{self, Write};

use crossterm::style::{Color, ResetColor, SetForegroundColor};
use similar::{ChangeTag, TextDiff};

/// Write a line diff between old and new text.
/// If `use_color` is true, deleted lines are red and inserted lines are green.
pub fn write_diff<W: Write>(
    writer: &mut W,
    old: &str,
    new: &str,
    use_color: bool,
) -> io::Result<()> {
    let diff = TextDiff::from_lines(old, new);
    for change in diff.iter_all_changes() {
        let (sign, color) = match change.tag() {
            ChangeTag::Delete => ("-", Some(Color::Red)),
            ChangeTag::Insert => ("+", Some(Color::Green)),
            ChangeTag::Equal => (" ", None),
        };

        if use_color && let Some(c) = color {
            write!(writer, "{}", SetForegroundColor(c))?;
        }

        write!(writer, "{}{}", sign, change)?;
        if change.missing_newline() {
            writeln!(writer)?;
        }

        if use_color && color.is_some() {
            write!(writer, "{}", ResetColor)?;
        }
    }
    Ok(())
}

/// Write a single line with color (for simple -/+ diffs like title).
pub fn write_colored_line<W: Write>(
    writer: &mut W,
    prefix: &str,
    text: &str,
    color: Color,
    use_color: bool,
) -> io::Result<()> {
    if use_color {
        writeln!(
            writer,
            "{}{}{}{}",
            SetForegroundColor(color),
            prefix,
            text,
            ResetColor
        )
    } else {
        writeln!(writer, "{}{}", prefix, text)
    }
}
