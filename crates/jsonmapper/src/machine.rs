//! The grammar state machine.
//!
//! The machine is driven one byte at a time through
//! [`GrammarStateMachine::transition`]. Each byte is classified, and the pair
//! `(state, class)` is looked up in the transition table. A missing entry is
//! the only way the grammar rejects input; every other entry is an action
//! that mutates the state, the key/value buffers, the nesting stack or the
//! sink stack.
//!
//! # Sinks
//!
//! The sink stack is seeded with the caller's root sink, which receives the
//! members of the outermost object. Opening a scope as the member of an
//! object asks the innermost sink for a child via
//! [`Mapper::mapper_for`] with the member's key; opening an object as an
//! array element reuses the sink of the array.
//!
//! ```rust
//! use jsonmapper::{parse_slice, GrammarStateMachine, ObjectSink, State};
//!
//! let root = ObjectSink::shared();
//! let mut machine = GrammarStateMachine::new(root.clone());
//! parse_slice(br#"{"data": {"id": "1"}}"#, &mut machine).unwrap();
//!
//! assert_eq!(machine.state(), State::Start);
//! let data = root.borrow().child("data").unwrap();
//! assert_eq!(data.borrow().string("id"), Some("1".into()));
//! ```

use alloc::vec::Vec;
use core::fmt;

use bstr::{BString, ByteSlice};
use log::{debug, trace, warn};

use crate::{
    Discard, GrammarError, Input, MapperRef, ParserOptions, ScopeKind, State, classify,
    mapper_ref,
    scope::{Frame, ScopeStack},
};

/// The effect of one byte, selected by `(state, class)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// Consume the byte without any effect.
    Absorb,
    OpenScope(ScopeKind),
    CloseScope(ScopeKind),
    BeginKey,
    AppendKey,
    EndKey,
    Colon,
    BeginString,
    AppendString,
    EndString,
    BeginNumber,
    AppendNumber,
    EndNumber,
    /// `,` after a value; continues the innermost scope.
    NextMember,
}

/// The transition table.
#[allow(clippy::match_same_arms)]
pub(crate) const fn action(state: State, input: Input) -> Option<Action> {
    use Input as I;
    use State as S;

    let action = match (state, input) {
        (S::Start, I::Whitespace) => Action::Absorb,
        (S::Start, I::ObjectOpen) => Action::OpenScope(ScopeKind::Object),

        (S::InObject, I::Whitespace) => Action::Absorb,
        (S::InObject, I::Quote) => Action::BeginKey,
        (S::InObject, I::ObjectClose) => Action::CloseScope(ScopeKind::Object),

        (S::InObjectKey, I::Quote) => Action::EndKey,
        (S::InObjectKey, i) if i.is_literal() => Action::AppendKey,

        (S::AfterKey, I::Whitespace) => Action::Absorb,
        (S::AfterKey, I::Colon) => Action::Colon,

        (S::AfterColon, I::Whitespace) => Action::Absorb,
        (S::AfterColon, I::Digit) => Action::BeginNumber,
        (S::AfterColon, I::Quote) => Action::BeginString,
        (S::AfterColon, I::ObjectOpen) => Action::OpenScope(ScopeKind::Object),
        (S::AfterColon, I::ArrayOpen) => Action::OpenScope(ScopeKind::Array),

        (S::InStringValue, I::Quote) => Action::EndString,
        (S::InStringValue, _) => Action::AppendString,

        (S::InNumberValue, I::Digit | I::Dot) => Action::AppendNumber,
        (S::InNumberValue, I::Whitespace) => Action::EndNumber,

        (S::AfterValue, I::Whitespace) => Action::Absorb,
        (S::AfterValue, I::Comma) => Action::NextMember,
        (S::AfterValue, I::ObjectClose) => Action::CloseScope(ScopeKind::Object),
        (S::AfterValue, I::ArrayClose) => Action::CloseScope(ScopeKind::Array),

        (S::BetweenMembers, I::Whitespace) => Action::Absorb,
        (S::BetweenMembers, I::Quote) => Action::BeginKey,

        (S::InArray, I::Whitespace) => Action::Absorb,
        (S::InArray, I::ObjectOpen) => Action::OpenScope(ScopeKind::Object),
        (S::InArray, I::ArrayClose) => Action::CloseScope(ScopeKind::Array),

        _ => return None,
    };
    Some(action)
}

/// Recognizes one document and pushes its members into sinks.
///
/// A machine is single-use and not reentrant: it owns its state, buffers and
/// stacks and mutates them in place. Independent documents need independent
/// machines.
pub struct GrammarStateMachine {
    state: State,
    scopes: ScopeStack,

    /// Receives the members of the outermost object.
    root: MapperRef,
    /// Sinks resolved for nested scopes, innermost last.
    sinks: Vec<MapperRef>,

    key: BString,
    value: BString,
    /// Only filled when numbers are delivered.
    number: BString,
    /// The number being read already holds a `.`.
    seen_dot: bool,
    /// A top-level object has closed.
    finished: bool,

    options: ParserOptions,
}

impl fmt::Debug for GrammarStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrammarStateMachine")
            .field("state", &self.state)
            .field("scopes", &self.scopes)
            .field("sink_depth", &self.sink_depth())
            .field("key", &self.key)
            .field("value", &self.value)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl GrammarStateMachine {
    /// Creates a machine in [`State::Start`] whose sink stack holds `root`.
    #[must_use]
    pub fn new(root: MapperRef) -> Self {
        Self::with_options(root, ParserOptions::default())
    }

    /// Creates a machine with the given options.
    #[must_use]
    pub fn with_options(root: MapperRef, options: ParserOptions) -> Self {
        Self {
            state: State::Start,
            scopes: ScopeStack::new(),
            root,
            sinks: Vec::new(),
            key: BString::default(),
            value: BString::default(),
            number: BString::default(),
            seen_dot: false,
            finished: false,
            options,
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Number of open scopes.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Number of sinks on the sink stack, the root included.
    #[must_use]
    pub fn sink_depth(&self) -> usize {
        self.sinks.len() + 1
    }

    /// Kinds of the open scopes, outermost first.
    pub fn scopes(&self) -> impl Iterator<Item = ScopeKind> + '_ {
        self.scopes.iter()
    }

    /// Whether the machine is outside of any scope.
    ///
    /// After a successful parse this tells whether the input held a complete
    /// document, since running out of input is not an error by default.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == State::Start && self.scopes.is_empty()
    }

    /// The options the machine was created with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Fails with [`GrammarError::Incomplete`] unless [`Self::is_complete`].
    ///
    /// # Errors
    ///
    /// When a scope is still open or a token is unfinished.
    pub fn finish(&self) -> Result<(), GrammarError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(GrammarError::Incomplete {
                state: self.state,
                depth: self.scopes.depth(),
            })
        }
    }

    /// Feeds one byte to the machine.
    ///
    /// On error the machine is left as it was before the byte.
    ///
    /// # Errors
    ///
    /// [`GrammarError::NoTransition`] when the current state does not accept
    /// the byte's class, [`GrammarError::ScopeMismatch`] when a closing
    /// bracket does not match the innermost scope, and
    /// [`GrammarError::MissingSinkResolution`] when a nested member has no
    /// sink.
    pub fn transition(&mut self, byte: u8) -> Result<(), GrammarError> {
        let input = classify(byte);
        let Some(action) = self.lookup(input) else {
            return Err(GrammarError::NoTransition {
                state: self.state,
                input,
                byte,
            });
        };
        trace!("{} + {input} -> {action:?}", self.state);
        let applied = self.apply(action, byte);
        #[cfg(any(test, feature = "fuzzing"))]
        assert_eq!(
            self.sinks.len(),
            self.scopes.owned_sinks(),
            "Internal error: sink stack out of step with scope stack"
        );
        applied
    }

    /// The table entry for `input`, narrowed by context the table does not
    /// see.
    fn lookup(&self, input: Input) -> Option<Action> {
        let action = action(self.state, input)?;
        let rejected = match (self.state, action) {
            (State::Start, Action::OpenScope(_)) => {
                self.finished && !self.options.allow_multiple_documents
            }
            (State::InNumberValue, Action::AppendNumber) => input == Input::Dot && self.seen_dot,
            (State::InArray, Action::CloseScope(ScopeKind::Array)) => self.scopes.after_comma(),
            _ => false,
        };
        (!rejected).then_some(action)
    }

    fn apply(&mut self, action: Action, byte: u8) -> Result<(), GrammarError> {
        match action {
            Action::Absorb => {}
            Action::OpenScope(kind) => self.open_scope(kind)?,
            Action::CloseScope(kind) => self.close_scope(kind)?,
            Action::BeginKey => {
                self.key.clear();
                self.state = State::InObjectKey;
            }
            Action::AppendKey => self.key.push(byte),
            Action::EndKey => self.state = State::AfterKey,
            Action::Colon => self.state = State::AfterColon,
            Action::BeginString => {
                self.value.clear();
                self.state = State::InStringValue;
            }
            Action::AppendString => self.value.push(byte),
            Action::EndString => {
                self.top_sink()
                    .borrow_mut()
                    .set_string(self.key.as_bstr(), self.value.as_bstr());
                self.key.clear();
                self.value.clear();
                self.state = State::AfterValue;
            }
            Action::BeginNumber => {
                self.seen_dot = false;
                if self.options.deliver_numbers {
                    self.number.clear();
                    self.number.push(byte);
                }
                self.state = State::InNumberValue;
            }
            Action::AppendNumber => {
                self.seen_dot |= byte == b'.';
                if self.options.deliver_numbers {
                    self.number.push(byte);
                }
            }
            Action::EndNumber => {
                if self.options.deliver_numbers {
                    self.top_sink()
                        .borrow_mut()
                        .set_number(self.key.as_bstr(), self.number.as_bstr());
                    self.number.clear();
                }
                self.key.clear();
                self.state = State::AfterValue;
            }
            Action::NextMember => {
                self.state = match self.scopes.top_kind() {
                    Some(ScopeKind::Array) => {
                        self.scopes.set_after_comma(true);
                        State::InArray
                    }
                    _ => State::BetweenMembers,
                };
            }
        }
        Ok(())
    }

    fn top_sink(&self) -> &MapperRef {
        self.sinks.last().unwrap_or(&self.root)
    }

    fn open_scope(&mut self, kind: ScopeKind) -> Result<(), GrammarError> {
        // The outermost scope belongs to the root sink, and array elements
        // share the sink of their array.
        let owns_sink = self.scopes.top_kind() == Some(ScopeKind::Object);
        if owns_sink {
            let resolved = self
                .top_sink()
                .borrow_mut()
                .mapper_for(self.key.as_bstr());
            let sink = match resolved {
                Some(sink) => sink,
                None if self.options.discard_unmapped => {
                    warn!("no sink for {:?}, discarding its members", self.key);
                    mapper_ref(Discard)
                }
                None => {
                    return Err(GrammarError::MissingSinkResolution {
                        key: self.key.clone(),
                    });
                }
            };
            self.sinks.push(sink);
            self.key.clear();
        }

        // An element arrived, so the array may close again.
        self.scopes.set_after_comma(false);
        self.scopes.push(Frame {
            kind,
            owns_sink,
            after_comma: false,
        });
        self.state = match kind {
            ScopeKind::Object => State::InObject,
            ScopeKind::Array => State::InArray,
        };
        debug!("opened {kind} at depth {}", self.scopes.depth());
        Ok(())
    }

    fn close_scope(&mut self, kind: ScopeKind) -> Result<(), GrammarError> {
        let frame = self
            .scopes
            .pop_matching(kind)
            .map_err(|expected| GrammarError::ScopeMismatch {
                expected,
                found: kind,
            })?;
        if frame.owns_sink {
            self.sinks.pop();
        }

        if self.scopes.is_empty() {
            debug!("document complete");
            self.finished = true;
            self.state = State::Start;
        } else {
            debug!("closed {kind}, depth {}", self.scopes.depth());
            self.state = State::AfterValue;
        }
        Ok(())
    }
}
