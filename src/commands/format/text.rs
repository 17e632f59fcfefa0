/// Adds an indent prefix to the beginning of each line in the text.
pub fn indent_text(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// "open" → "Open", "closed" → "Closed"; anything else is shown as-is.
pub fn format_state(state: &str) -> &str {
    match state {
        "open" => "Open",
        "closed" => "Closed",
        _ => state,
    }
}
