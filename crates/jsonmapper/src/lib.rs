//! A pull-based parser for a small JSON subset that delivers members straight
//! into caller-owned sinks instead of building a document tree.
//!
//! The caller implements [`Mapper`] for its destination, hands the root sink
//! to a [`GrammarStateMachine`] and drives it with [`parse`] from any
//! [`ByteSource`]. String members arrive through [`Mapper::set_string`];
//! nested objects and arrays ask the enclosing sink for a child through
//! [`Mapper::mapper_for`].
//!
//! The accepted grammar is deliberately reduced: objects, arrays of objects,
//! quoted keys and string values without escape processing, and unsigned
//! decimal numbers terminated by whitespace. Booleans, `null`, signs and
//! exponents are rejected.
//!
//! ```rust
//! use jsonmapper::{parse_slice, GrammarStateMachine, ObjectSink};
//!
//! let root = ObjectSink::shared();
//! let mut machine = GrammarStateMachine::new(root.clone());
//! parse_slice(br#"{"user": {"name": "Ada"}, "tag": "x"}"#, &mut machine).unwrap();
//!
//! let root = root.borrow();
//! assert_eq!(root.string("tag"), Some("x".into()));
//! let user = root.child("user").unwrap();
//! assert_eq!(user.borrow().string("name"), Some("Ada".into()));
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod error;
mod input;
mod machine;
mod mapper;
mod options;
mod parser;
mod scope;
mod source;
mod state;

#[cfg(test)]
mod tests;

pub use error::{ErrorSource, GrammarError, ParserError};
pub use input::{Input, classify};
pub use machine::GrammarStateMachine;
pub use mapper::{Discard, Field, Mapper, MapperRef, ObjectSink, mapper_ref};
pub use options::ParserOptions;
pub use parser::{Parser, parse, parse_slice};
pub use scope::ScopeKind;
#[cfg(feature = "std")]
pub use source::ReadSource;
pub use source::{ByteSource, IterSource, SliceSource};
pub use state::State;
