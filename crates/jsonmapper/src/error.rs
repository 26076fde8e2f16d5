use core::convert::Infallible;

use bstr::BString;
use thiserror::Error;

use crate::{Input, ScopeKind, State};

/// A parse failure, with the position of the byte that caused it.
#[derive(Error, Debug, PartialEq)]
#[error("{source} at {line}:{column}")]
pub struct ParserError<E = Infallible> {
    pub(crate) source: ErrorSource<E>,
    /// 1-based line of the offending byte.
    pub line: usize,
    /// 1-based column of the offending byte.
    pub column: usize,
}

impl<E> ParserError<E> {
    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorSource<E> {
        &self.source
    }

    /// The grammar failure, if the byte source itself did not fail.
    #[must_use]
    pub fn grammar(&self) -> Option<&GrammarError> {
        match &self.source {
            ErrorSource::Grammar(err) => Some(err),
            ErrorSource::Source(_) => None,
        }
    }

    /// Discards the position.
    pub fn into_source(self) -> ErrorSource<E> {
        self.source
    }
}

/// Where a parse failure originated.
#[derive(Error, Debug, PartialEq)]
pub enum ErrorSource<E> {
    /// Reading from the byte source failed.
    #[error("source error: {0}")]
    Source(E),
    /// The input did not match the grammar.
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),
}

/// A failure detected by the grammar state machine. Every variant is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// The current state has no action for this class of input.
    #[error("no transition from {state} on {input} (byte 0x{byte:02x})")]
    NoTransition {
        /// State the machine was in.
        state: State,
        /// Class of the offending byte.
        input: Input,
        /// The offending byte.
        byte: u8,
    },
    /// A closing bracket does not match the innermost open scope.
    #[error("closing {found} does not match {}", describe_open(*expected))]
    ScopeMismatch {
        /// Kind of the innermost open scope, `None` if nothing is open.
        expected: Option<ScopeKind>,
        /// Kind of the closing bracket.
        found: ScopeKind,
    },
    /// The enclosing sink supplied no child sink for a nested member.
    #[error("no sink for nested member {key:?}")]
    MissingSinkResolution {
        /// Key of the nested member.
        key: BString,
    },
    /// The input ended before the outermost scope closed.
    #[error("unexpected end of input in {state} at depth {depth}")]
    Incomplete {
        /// State the machine was left in.
        state: State,
        /// Number of scopes still open.
        depth: usize,
    },
}

fn describe_open(kind: Option<ScopeKind>) -> &'static str {
    match kind {
        Some(ScopeKind::Object) => "open object",
        Some(ScopeKind::Array) => "open array",
        None => "any open scope",
    }
}
