#![no_main]

use arbitrary::Arbitrary;
use jsonmapper::{GrammarStateMachine, Mapper, ObjectSink, ParserOptions, parse_slice};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Member {
    Str(String),
    Num(u32, Option<u16>),
    Obj(Object),
    List(Vec<Object>),
}

#[derive(Arbitrary, Debug)]
struct Object(Vec<(String, Member)>);

#[derive(Arbitrary, Debug)]
struct Input {
    root: Object,
    deliver_numbers: bool,
    spacing: Vec<u8>,
}

const WHITESPACE: &[&str] = &["", " ", "\n", "\t", "\r\n"];

/// Keys may not contain whitespace, and neither keys nor values may contain
/// a quote. Backslashes and control bytes are dropped so the text stays JSON.
fn clean(text: &str, allow_space: bool) -> String {
    text.chars()
        .filter(|&c| c != '"' && c != '\\' && !c.is_control())
        .filter(|&c| allow_space || !matches!(c, ' ' | '\t' | '\n' | '\r'))
        .collect()
}

struct Renderer<'a> {
    spacing: &'a [u8],
    next: usize,
    out: String,
}

impl Renderer<'_> {
    fn space(&mut self) {
        if let Some(&pick) = self.spacing.get(self.next) {
            self.next += 1;
            self.out.push_str(WHITESPACE[pick as usize % WHITESPACE.len()]);
        }
    }

    fn object(&mut self, object: &Object) {
        self.out.push('{');
        self.space();
        for (i, (key, member)) in object.0.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
                self.space();
            }
            self.out.push('"');
            self.out.push_str(&clean(key, false));
            self.out.push('"');
            self.space();
            self.out.push(':');
            self.space();
            match member {
                Member::Str(value) => {
                    self.out.push('"');
                    self.out.push_str(&clean(value, true));
                    self.out.push('"');
                }
                Member::Num(int, frac) => {
                    self.out.push_str(&int.to_string());
                    if let Some(frac) = frac {
                        self.out.push('.');
                        self.out.push_str(&frac.to_string());
                    }
                    // Numbers only end at whitespace.
                    self.out.push(' ');
                }
                Member::Obj(nested) => self.object(nested),
                Member::List(elements) => {
                    self.out.push('[');
                    self.space();
                    for (j, element) in elements.iter().enumerate() {
                        if j > 0 {
                            self.out.push(',');
                            self.space();
                        }
                        self.object(element);
                        self.space();
                    }
                    self.out.push(']');
                }
            }
            self.space();
        }
        self.out.push('}');
    }
}

/// Feeds `object` to `sink` the way the parser is expected to.
fn replay(object: &Object, sink: &mut dyn Mapper, deliver_numbers: bool) {
    for (key, member) in &object.0 {
        let key = clean(key, false);
        match member {
            Member::Str(value) => {
                let value = clean(value, true);
                sink.set_string(key.as_str().into(), value.as_str().into());
            }
            Member::Num(int, frac) => {
                if deliver_numbers {
                    let lexeme = match frac {
                        Some(frac) => format!("{int}.{frac}"),
                        None => int.to_string(),
                    };
                    sink.set_number(key.as_str().into(), lexeme.as_str().into());
                }
            }
            Member::Obj(nested) => {
                if let Some(child) = sink.mapper_for(key.as_str().into()) {
                    replay(nested, &mut *child.borrow_mut(), deliver_numbers);
                }
            }
            Member::List(elements) => {
                if let Some(child) = sink.mapper_for(key.as_str().into()) {
                    for element in elements {
                        replay(element, &mut *child.borrow_mut(), deliver_numbers);
                    }
                }
            }
        }
    }
}

fn documents(input: &Input) {
    let mut renderer = Renderer {
        spacing: &input.spacing,
        next: 0,
        out: String::new(),
    };
    renderer.space();
    renderer.object(&input.root);
    renderer.space();
    let text = renderer.out;

    serde_json::from_str::<serde_json::Value>(&text).expect("rendered document is JSON");

    let options = ParserOptions {
        deliver_numbers: input.deliver_numbers,
        require_complete: true,
        ..Default::default()
    };
    let root = ObjectSink::shared();
    let mut machine = GrammarStateMachine::with_options(root.clone(), options);
    parse_slice(text.as_bytes(), &mut machine).expect("rendered document parses");

    let mut expected = ObjectSink::new();
    replay(&input.root, &mut expected, input.deliver_numbers);
    assert_eq!(*root.borrow(), expected, "{text}");
}

fuzz_target!(|input: Input| documents(&input));
