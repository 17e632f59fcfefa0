mod text;
mod time;

pub use text::{format_state, indent_text};
pub use time::format_relative_time;
