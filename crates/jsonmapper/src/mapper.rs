//! Sinks that receive parsed values.
//!
//! A [`Mapper`] is owned by the caller and shared with the
//! [`GrammarStateMachine`](crate::GrammarStateMachine) through a
//! [`MapperRef`]. The machine keeps one sink per open object boundary and
//! routes every completed member to the innermost one.

use alloc::{collections::BTreeMap, rc::Rc};
use core::cell::RefCell;

use bstr::{BStr, BString, ByteSlice};

/// Shared handle to a caller-owned sink.
pub type MapperRef = Rc<RefCell<dyn Mapper>>;

/// Wraps a sink into a [`MapperRef`].
///
/// ```rust
/// use jsonmapper::{mapper_ref, Discard, MapperRef};
///
/// let sink: MapperRef = mapper_ref(Discard);
/// ```
pub fn mapper_ref<M: Mapper + 'static>(mapper: M) -> MapperRef {
    Rc::new(RefCell::new(mapper))
}

/// Destination for the keys and values of one object scope.
///
/// Keys and values are handed over as raw byte strings: the parser does not
/// decode escapes or multi-byte characters.
pub trait Mapper {
    /// A string member `key: "value"` was read in this sink's scope.
    fn set_string(&mut self, key: &BStr, value: &BStr);

    /// An object or array member named `key` is being opened. Returns the sink
    /// that receives the members of the nested scope.
    ///
    /// Returning `None` fails the parse with
    /// [`GrammarError::MissingSinkResolution`](crate::GrammarError) unless
    /// [`ParserOptions::discard_unmapped`](crate::ParserOptions) is set. Return
    /// a [`Discard`] sink to skip a subtree explicitly.
    fn mapper_for(&mut self, key: &BStr) -> Option<MapperRef>;

    /// A number member was read. Only called when
    /// [`ParserOptions::deliver_numbers`](crate::ParserOptions) is set; the
    /// lexeme is the literal text of the number.
    fn set_number(&mut self, key: &BStr, lexeme: &BStr) {
        let _ = (key, lexeme);
    }
}

/// A sink that ignores everything, including whole subtrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discard;

impl Mapper for Discard {
    fn set_string(&mut self, _key: &BStr, _value: &BStr) {}

    fn mapper_for(&mut self, _key: &BStr) -> Option<MapperRef> {
        Some(mapper_ref(Discard))
    }
}

/// A member value stored by [`ObjectSink`].
#[derive(Debug, Clone)]
pub enum Field {
    /// A string value.
    String(BString),
    /// The literal text of a number value.
    Number(BString),
    /// A nested object, or the shared sink of an array's elements.
    Object(Rc<RefCell<ObjectSink>>),
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Field::String(a), Field::String(b)) | (Field::Number(a), Field::Number(b)) => a == b,
            (Field::Object(a), Field::Object(b)) => *a.borrow() == *b.borrow(),
            _ => false,
        }
    }
}

/// A generic container sink, keyed by member name.
///
/// Every nested member gets a fresh child `ObjectSink`. A repeated key
/// overwrites the earlier value. The elements of an array share one child, so
/// their members accumulate in it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSink {
    fields: BTreeMap<BString, Field>,
}

impl ObjectSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sink behind a shared handle, for use as a root.
    #[must_use]
    pub fn shared() -> Rc<RefCell<ObjectSink>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Looks up a member.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key.as_bytes().as_bstr())
    }

    /// The string value of `key`, if it holds one.
    #[must_use]
    pub fn string(&self, key: &str) -> Option<&BStr> {
        match self.get(key)? {
            Field::String(value) => Some(value.as_bstr()),
            _ => None,
        }
    }

    /// The child sink of `key`, if it holds one.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<Rc<RefCell<ObjectSink>>> {
        match self.get(key)? {
            Field::Object(child) => Some(Rc::clone(child)),
            _ => None,
        }
    }

    /// Iterates over the stored members in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&BStr, &Field)> {
        self.fields.iter().map(|(key, field)| (key.as_bstr(), field))
    }

    /// Number of stored members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no member was stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Mapper for ObjectSink {
    fn set_string(&mut self, key: &BStr, value: &BStr) {
        self.fields.insert(key.into(), Field::String(value.into()));
    }

    fn mapper_for(&mut self, key: &BStr) -> Option<MapperRef> {
        let child = ObjectSink::shared();
        self.fields
            .insert(key.into(), Field::Object(Rc::clone(&child)));
        Some(child)
    }

    fn set_number(&mut self, key: &BStr, lexeme: &BStr) {
        self.fields.insert(key.into(), Field::Number(lexeme.into()));
    }
}
