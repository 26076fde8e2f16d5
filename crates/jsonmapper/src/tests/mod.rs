use alloc::{
    rc::Rc,
    string::{String, ToString},
    vec::Vec,
};
use core::cell::{Cell, RefCell};

use bstr::BStr;

use crate::{Mapper, MapperRef, mapper_ref};


/// One sink invocation. `sink` numbers sinks in the order they were created,
/// the root being `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    SetString {
        sink: usize,
        key: String,
        value: String,
    },
    SetNumber {
        sink: usize,
        key: String,
        lexeme: String,
    },
    MapperFor {
        sink: usize,
        key: String,
    },
}

impl Call {
    pub(crate) fn set_string(sink: usize, key: &str, value: &str) -> Self {
        Call::SetString {
            sink,
            key: key.into(),
            value: value.into(),
        }
    }

    pub(crate) fn set_number(sink: usize, key: &str, lexeme: &str) -> Self {
        Call::SetNumber {
            sink,
            key: key.into(),
            lexeme: lexeme.into(),
        }
    }

    pub(crate) fn mapper_for(sink: usize, key: &str) -> Self {
        Call::MapperFor {
            sink,
            key: key.into(),
        }
    }
}

/// Shared log of every call made to the sinks of one parse.
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal {
    calls: Rc<RefCell<Vec<Call>>>,
    created: Rc<Cell<usize>>,
}

impl Journal {
    /// A root sink writing to this journal. When `resolve` is set, every
    /// `mapper_for` yields a new recording sink; otherwise it yields `None`.
    pub(crate) fn root(&self, resolve: bool) -> MapperRef {
        mapper_ref(self.recorder(resolve))
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn recorder(&self, resolve: bool) -> Recorder {
        let id = self.created.get();
        self.created.set(id + 1);
        Recorder {
            id,
            resolve,
            journal: self.clone(),
        }
    }
}

struct Recorder {
    id: usize,
    resolve: bool,
    journal: Journal,
}

fn lossy(bytes: &BStr) -> String {
    bytes.to_string()
}

impl Mapper for Recorder {
    fn set_string(&mut self, key: &BStr, value: &BStr) {
        self.journal.calls.borrow_mut().push(Call::SetString {
            sink: self.id,
            key: lossy(key),
            value: lossy(value),
        });
    }

    fn mapper_for(&mut self, key: &BStr) -> Option<MapperRef> {
        self.journal.calls.borrow_mut().push(Call::MapperFor {
            sink: self.id,
            key: lossy(key),
        });
        self.resolve
            .then(|| mapper_ref(self.journal.recorder(self.resolve)))
    }

    fn set_number(&mut self, key: &BStr, lexeme: &BStr) {
        self.journal.calls.borrow_mut().push(Call::SetNumber {
            sink: self.id,
            key: lossy(key),
            lexeme: lossy(lexeme),
        });
    }
}
