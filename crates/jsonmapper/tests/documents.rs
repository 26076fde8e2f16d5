#![allow(missing_docs)]
#![allow(clippy::needless_raw_string_hashes)]
#![cfg(feature = "std")]

use std::{
    cell::RefCell,
    io::{BufReader, Cursor},
    rc::Rc,
    thread,
};

use bstr::{BStr, ByteSlice};
use jsonmapper::{
    Discard, ErrorSource, GrammarError, GrammarStateMachine, Mapper, MapperRef, ObjectSink,
    ParserOptions, ReadSource, State, mapper_ref, parse, parse_slice,
};

const DOCUMENT: &str = r#"
{
    "moderation": {
        "decision": "allow"
    },
    "request": {
        "filename": "example.rs",
        "language": "rust",
        "options": {
            "opt_level": "2"
        }
    },
    "entities": [
        {
            "type": "function",
            "name": "main"
        },
        {
            "type": "macro",
            "name": "println"
        }
    ],
    "retries": 3
}"#;

#[derive(Debug, Default, PartialEq)]
struct Request {
    filename: String,
    language: String,
    opt_level: Option<String>,
}

/// A hand-written sink for a typed record: only the listed members are kept,
/// nested members it doesn't know about are skipped.
struct RequestMapper {
    request: Rc<RefCell<Request>>,
}

struct OptionsMapper {
    request: Rc<RefCell<Request>>,
}

fn text(value: &BStr) -> String {
    value.to_str_lossy().into_owned()
}

impl Mapper for RequestMapper {
    fn set_string(&mut self, key: &BStr, value: &BStr) {
        let mut request = self.request.borrow_mut();
        match key.as_bytes() {
            b"filename" => request.filename = text(value),
            b"language" => request.language = text(value),
            _ => {}
        }
    }

    fn mapper_for(&mut self, key: &BStr) -> Option<MapperRef> {
        if key == "options" {
            Some(mapper_ref(OptionsMapper {
                request: Rc::clone(&self.request),
            }))
        } else {
            Some(mapper_ref(Discard))
        }
    }
}

impl Mapper for OptionsMapper {
    fn set_string(&mut self, key: &BStr, value: &BStr) {
        if key == "opt_level" {
            self.request.borrow_mut().opt_level = Some(text(value));
        }
    }

    fn mapper_for(&mut self, _key: &BStr) -> Option<MapperRef> {
        None
    }
}

/// Routes `request` to a [`RequestMapper`] and ignores everything else.
struct Envelope {
    request: Rc<RefCell<Request>>,
}

impl Mapper for Envelope {
    fn set_string(&mut self, _key: &BStr, _value: &BStr) {}

    fn mapper_for(&mut self, key: &BStr) -> Option<MapperRef> {
        (key == "request").then(|| {
            mapper_ref(RequestMapper {
                request: Rc::clone(&self.request),
            })
        })
    }
}

#[test]
fn typed_record_from_document() {
    let request = Rc::new(RefCell::new(Request::default()));
    let mut machine = GrammarStateMachine::with_options(
        mapper_ref(Envelope {
            request: Rc::clone(&request),
        }),
        ParserOptions {
            discard_unmapped: true,
            require_complete: true,
            ..Default::default()
        },
    );
    parse_slice(DOCUMENT.as_bytes(), &mut machine).unwrap();

    assert_eq!(
        *request.borrow(),
        Request {
            filename: "example.rs".into(),
            language: "rust".into(),
            opt_level: Some("2".into()),
        }
    );
}

#[test]
fn object_sink_from_buffered_reader() {
    let root = ObjectSink::shared();
    let mut machine = GrammarStateMachine::new(root.clone());
    let reader = BufReader::new(Cursor::new(DOCUMENT.as_bytes().to_vec()));
    parse(ReadSource::new(reader), &mut machine).unwrap();
    assert!(machine.is_complete());

    let root = root.borrow();
    let moderation = root.child("moderation").unwrap();
    assert_eq!(moderation.borrow().string("decision"), Some("allow".into()));
    let entities = root.child("entities").unwrap();
    // Elements share one sink, so the last element wins.
    assert_eq!(entities.borrow().string("name"), Some("println".into()));
    // Numbers are not delivered unless asked for.
    assert!(root.get("retries").is_none());
}

#[test]
fn document_is_valid_json() {
    let value: serde_json::Value = serde_json::from_str(DOCUMENT).unwrap();
    assert_eq!(value["request"]["options"]["opt_level"], "2");
}

#[test]
fn independent_parses_run_in_parallel() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let input = format!("{{\"worker\": \"{i}\", \"nested\": {{\"id\": \"{i}\"}}}}");
                let root = ObjectSink::shared();
                let mut machine = GrammarStateMachine::new(root.clone());
                parse_slice(input.as_bytes(), &mut machine).unwrap();
                let child = root.borrow().child("nested").unwrap();
                child.borrow().string("id").map(|id| id.to_string())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(i.to_string()));
    }
}

#[test]
fn io_errors_are_reported_as_source_errors() {
    struct Broken;

    impl std::io::Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk on fire"))
        }
    }

    let mut machine = GrammarStateMachine::new(ObjectSink::shared());
    let err = parse(ReadSource::new(Broken), &mut machine).unwrap_err();
    assert!(matches!(err.kind(), ErrorSource::Source(io) if io.to_string() == "disk on fire"));
    assert_eq!(err.to_string(), "source error: disk on fire at 1:1");
    assert_eq!(machine.state(), State::Start);
}

#[test]
fn missing_sink_names_the_member() {
    struct Strict;

    impl Mapper for Strict {
        fn set_string(&mut self, _key: &BStr, _value: &BStr) {}

        fn mapper_for(&mut self, _key: &BStr) -> Option<MapperRef> {
            None
        }
    }

    let mut machine = GrammarStateMachine::new(mapper_ref(Strict));
    let err = parse_slice(DOCUMENT.as_bytes(), &mut machine).unwrap_err();
    assert_eq!(
        err.grammar(),
        Some(&GrammarError::MissingSinkResolution {
            key: "moderation".into()
        })
    );
    assert_eq!((err.line, err.column), (3, 19));
}

#[cfg(feature = "serde")]
#[test]
fn options_from_config() {
    let options: ParserOptions =
        serde_json::from_str(r#"{"discard_unmapped": true, "require_complete": true}"#).unwrap();
    assert!(options.discard_unmapped);
    assert!(!options.deliver_numbers);
    assert!(options.require_complete);
}
