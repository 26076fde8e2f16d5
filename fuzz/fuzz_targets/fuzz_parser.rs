#![no_main]

use jsonmapper::{
    Discard, GrammarStateMachine, ObjectSink, ParserOptions, mapper_ref, parse_slice,
};
use libfuzzer_sys::fuzz_target;

fn parser(data: &[u8]) {
    let Some((&flags, data)) = data.split_first() else {
        return;
    };

    let options = ParserOptions {
        discard_unmapped: flags & 1 != 0,
        deliver_numbers: flags & 2 != 0,
        require_complete: flags & 4 != 0,
        allow_multiple_documents: flags & 16 != 0,
    };
    let root = if flags & 8 != 0 {
        mapper_ref(Discard)
    } else {
        ObjectSink::shared()
    };

    let mut machine = GrammarStateMachine::with_options(root, options);
    match parse_slice(data, &mut machine) {
        Ok(()) => {
            if options.require_complete {
                assert!(machine.is_complete());
            }
        }
        Err(err) => {
            // Errors point at a byte that was actually read.
            let line_breaks = data.iter().filter(|&&b| b == b'\n').count();
            assert!(err.line >= 1 && err.line <= line_breaks + 1);
            assert!(err.column >= 1);
        }
    }
}

fuzz_target!(|data: &[u8]| parser(data));
