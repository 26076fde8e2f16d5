//! The nesting stack.
//!
//! One [`Frame`] per open `{` or `[`. Each frame remembers whether opening it
//! pushed a sink, so that closing it pops the sink stack exactly when the
//! matching push happened.

use alloc::vec::Vec;
use core::fmt;

/// The bracket kind that opened a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScopeKind {
    /// Opened by `{`.
    Object,
    /// Opened by `[`.
    Array,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKind::Object => f.write_str("object"),
            ScopeKind::Array => f.write_str("array"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) kind: ScopeKind,
    /// The frame resolved its own sink on open.
    pub(crate) owns_sink: bool,
    /// An array saw `,` and still waits for the next element.
    pub(crate) after_comma: bool,
}

#[derive(Debug, Default)]
pub(crate) struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub(crate) fn new() -> Self {
        Self {
            frames: Vec::with_capacity(16),
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn top_kind(&self) -> Option<ScopeKind> {
        self.frames.last().map(|frame| frame.kind)
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub(crate) fn after_comma(&self) -> bool {
        self.frames.last().is_some_and(|frame| frame.after_comma)
    }

    pub(crate) fn set_after_comma(&mut self, after_comma: bool) {
        if let Some(frame) = self.frames.last_mut() {
            frame.after_comma = after_comma;
        }
    }

    /// Pops the innermost frame if it was opened by `kind`.
    ///
    /// On a mismatch the stack is left untouched and the kind of the
    /// innermost frame (if any) is returned as the error.
    pub(crate) fn pop_matching(&mut self, kind: ScopeKind) -> Result<Frame, Option<ScopeKind>> {
        match self.frames.pop() {
            Some(frame) if frame.kind == kind => Ok(frame),
            Some(frame) => {
                self.frames.push(frame);
                Err(Some(frame.kind))
            }
            None => Err(None),
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = ScopeKind> + '_ {
        self.frames.iter().map(|frame| frame.kind)
    }

    #[cfg(any(test, feature = "fuzzing"))]
    pub(crate) fn owned_sinks(&self) -> usize {
        self.frames.iter().filter(|frame| frame.owns_sink).count()
    }
}
