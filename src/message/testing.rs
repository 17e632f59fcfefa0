//! Test double for [`Editor`].

use std::cell::RefCell;

use super::editor::Editor;
use super::error::{MessageError, Result};

type Script = Box<dyn Fn(&str) -> Result<String>>;

/// Editor that rewrites the buffer with a closure and records what it was shown.
pub struct ScriptedEditor {
    script: Script,
    seen: RefCell<Vec<String>>,
}

impl ScriptedEditor {
    pub fn new(script: impl Fn(&str) -> String + 'static) -> Self {
        Self {
            script: Box::new(move |text| Ok(script(text))),
            seen: RefCell::new(Vec::new()),
        }
    }

    /// Replace whatever was in the buffer with `text`.
    pub fn replacing(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| text.clone())
    }

    /// Save the buffer without touching it.
    pub fn unchanged() -> Self {
        Self::new(str::to_string)
    }

    pub fn failing(reason: &str) -> Self {
        let reason = reason.to_string();
        Self {
            script: Box::new(move |_| Err(MessageError::EditorAborted(reason.clone()))),
            seen: RefCell::new(Vec::new()),
        }
    }

    /// Buffers handed to the editor, in order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.borrow().clone()
    }
}

impl Editor for ScriptedEditor {
    fn edit(&self, initial: &str) -> Result<String> {
        self.seen.borrow_mut().push(initial.to_string());
        (self.script)(initial)
    }
}
