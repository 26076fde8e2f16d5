//! The driver loop.
//!
//! [`Parser`] pulls bytes from a [`ByteSource`] and feeds them to a
//! [`GrammarStateMachine`] until the source is exhausted or a byte is
//! rejected. The first failure ends the parse; there is no recovery.
//!
//! # Examples
//!
//! ```rust
//! use jsonmapper::{parse_slice, GrammarStateMachine, ObjectSink};
//!
//! let root = ObjectSink::shared();
//! let mut machine = GrammarStateMachine::new(root.clone());
//! parse_slice(br#"{"name": "Ada", "tag": "x"}"#, &mut machine).unwrap();
//!
//! assert!(machine.is_complete());
//! assert_eq!(root.borrow().string("name"), Some("Ada".into()));
//! ```

use log::debug;

use crate::{ByteSource, ErrorSource, GrammarStateMachine, ParserError, SliceSource};

/// Drives a machine from a byte source, tracking the input position.
#[derive(Debug)]
pub struct Parser<S> {
    source: S,
    line: usize,
    column: usize,
}

impl<S: ByteSource> Parser<S> {
    /// Creates a driver positioned at line 1, column 1 of `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            line: 1,
            column: 1,
        }
    }

    /// Line of the next byte to be read.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column of the next byte to be read.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the byte source, positioned after the last byte consumed.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Feeds every remaining byte of the source to `machine`.
    ///
    /// Running out of input is a success unless
    /// [`ParserOptions::require_complete`](crate::ParserOptions) is set;
    /// otherwise check [`GrammarStateMachine::is_complete`].
    ///
    /// # Errors
    ///
    /// The first source failure or grammar failure, positioned at the
    /// offending byte.
    pub fn run(&mut self, machine: &mut GrammarStateMachine) -> Result<(), ParserError<S::Error>> {
        loop {
            let byte = match self.source.next_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(err) => return Err(self.error(ErrorSource::Source(err))),
            };
            if let Err(err) = machine.transition(byte) {
                debug!("rejected byte 0x{byte:02x} at {}:{}", self.line, self.column);
                return Err(self.error(err.into()));
            }
            self.advance(byte);
        }

        if machine.options().require_complete {
            machine.finish().map_err(|err| self.error(err.into()))?;
        }
        Ok(())
    }

    fn advance(&mut self, byte: u8) {
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn error(&self, source: ErrorSource<S::Error>) -> ParserError<S::Error> {
        ParserError {
            source,
            line: self.line,
            column: self.column,
        }
    }
}

/// Parses everything `source` yields into `machine`.
///
/// # Errors
///
/// See [`Parser::run`].
pub fn parse<S: ByteSource>(
    source: S,
    machine: &mut GrammarStateMachine,
) -> Result<(), ParserError<S::Error>> {
    Parser::new(source).run(machine)
}

/// Parses an in-memory document into `machine`.
///
/// # Errors
///
/// See [`Parser::run`].
pub fn parse_slice(input: &[u8], machine: &mut GrammarStateMachine) -> Result<(), ParserError> {
    parse(SliceSource::new(input), machine)
}
