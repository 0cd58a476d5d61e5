// Integration tests for the interpreter

use bli::codegen::text_to_program;
use bli::interpreter::cancel::CancelToken;
use bli::interpreter::config::{EofPolicy, ExecConfig, ExecutionMode};
use bli::interpreter::engine::Interpreter;
use bli::interpreter::errors::{Resource, RuntimeError, ValidationError};
use bli::interpreter::input::Input;
use bli::parser::program::{Command, Program};
use bli::Error;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

const HELLO_WORLD: &str = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";

const MODES: [ExecutionMode; 2] = [ExecutionMode::Interpreted, ExecutionMode::Compiled];

fn run_with(source: &str, config: ExecConfig, input: Input) -> Result<Vec<u8>, Error> {
    bli::execute_with(Program::from(source), config, input).map(|out| out.into_bytes())
}

fn run(source: &str, mode: ExecutionMode) -> Vec<u8> {
    run_with(source, ExecConfig::default().with_mode(mode), Input::empty())
        .expect("Execution failed")
}

/// Writer that keeps its bytes reachable after being boxed into the interpreter
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_hello_world() {
    for mode in MODES {
        assert_eq!(run(HELLO_WORLD, mode), b"Hello World!\n", "mode {:?}", mode);
    }
}

#[test]
fn test_hello_world_with_comments() {
    let source = format!("Hello program\n{}\nend of file", HELLO_WORLD.replace('[', "[ loop "));
    for mode in MODES {
        assert_eq!(run(&source, mode), b"Hello World!\n");
    }
}

#[test]
fn test_empty_program() {
    for mode in MODES {
        assert!(run("", mode).is_empty());
        assert!(run("only comments here", mode).is_empty());
    }
}

#[test]
fn test_execute_helper() {
    let output = bli::execute(b"++++++++[>++++++++<-]>+.", Input::empty())
        .expect("Execution failed");
    assert_eq!(output.as_bytes(), b"A");
}

#[test]
fn test_modes_agree() {
    let programs = [
        HELLO_WORLD,
        "++++[>+++++<-]>[<+++++>-]<.",
        "+++++[>>+<<-]>>[-<+>]<.>.",
        ">>+++<<[-]>>[<<+>>-]<<.",
        "-.+.--.",
        "++[>++[>++<-]<-]>>.",
    ];
    for source in programs {
        assert_eq!(
            run(source, ExecutionMode::Interpreted),
            run(source, ExecutionMode::Compiled),
            "program {:?}",
            source
        );
    }
}

#[test]
fn test_unmatched_open() {
    let err = run_with("[[]", ExecConfig::default(), Input::empty()).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::UnmatchedOpen {
            count: 1,
            position: 0
        })
    ));
}

#[test]
fn test_unmatched_close() {
    let err = run_with("[]]", ExecConfig::default(), Input::empty()).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::UnmatchedClose { position: 2 })
    ));

    let err = run_with("]", ExecConfig::default(), Input::empty()).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::UnmatchedClose { position: 0 })
    ));
}

#[test]
fn test_validation_happens_before_output() {
    // The `.` would run before the stray `]` if validation were lazy
    let result = Interpreter::new(Program::from("+.]"), ExecConfig::default());
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::UnmatchedClose { position: 2 }))
    ));
}

#[test]
fn test_unallocatable_initial_tape() {
    let config = ExecConfig {
        initial_tape_len: usize::MAX,
        ..ExecConfig::default()
    };
    let result = Interpreter::new(Program::from("+."), config);
    assert!(matches!(
        result,
        Err(Error::Runtime(RuntimeError::ResourceExhausted {
            resource: Resource::Tape,
            ..
        }))
    ));
}

#[test]
fn test_eof_leaves_cell_unchanged_by_default() {
    for mode in MODES {
        let out = run_with(
            "+++,.",
            ExecConfig::default().with_mode(mode),
            Input::empty(),
        )
        .expect("Execution failed");
        assert_eq!(out, [3]);
    }
}

#[test]
fn test_eof_zero_policy() {
    let config = ExecConfig::default().with_eof_policy(EofPolicy::Zero);
    let out = run_with("+++,.", config, Input::empty()).expect("Execution failed");
    assert_eq!(out, [0]);
}

#[test]
fn test_preset_input_then_reader() {
    let input = Input::from_reader(io::Cursor::new(b"cd".to_vec())).with_preset("ab");
    let out = run_with(",.,.,.,.,.", ExecConfig::default(), input).expect("Execution failed");
    // Fifth read hits end of input and leaves 'd' in place
    assert_eq!(out, b"abcdd");
}

#[test]
fn test_echo_until_zero() {
    let input = Input::from_bytes(b"bli\0".to_vec());
    let out = run_with(",[.,]", ExecConfig::default(), input).expect("Execution failed");
    assert_eq!(out, b"bli");
}

#[test]
fn test_cursor_underflow() {
    let err = run_with("<", ExecConfig::default(), Input::empty()).unwrap_err();
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::CursorUnderflow { position: 0 })
    ));

    let config = ExecConfig::default().with_mode(ExecutionMode::Interpreted);
    let err = run_with("+>><<<", config, Input::empty()).unwrap_err();
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::CursorUnderflow { position: 5 })
    ));

    // Folded run reports the position of its first byte
    let err = run_with("+>><<<", ExecConfig::default(), Input::empty()).unwrap_err();
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::CursorUnderflow { position: 3 })
    ));
}

#[test]
fn test_partial_output_kept_on_error() {
    for mode in MODES {
        let config = ExecConfig::default().with_mode(mode);
        let mut interpreter =
            Interpreter::new(Program::from("+++.<"), config).expect("Validation failed");
        let result = interpreter.run();
        assert!(matches!(result, Err(RuntimeError::CursorUnderflow { .. })));
        assert_eq!(interpreter.output().as_bytes(), [3]);
        assert!(!interpreter.is_finished());
    }
}

#[test]
fn test_cancelled_before_start() {
    let cancel = CancelToken::new();
    cancel.cancel();

    let mut interpreter = Interpreter::new(Program::from("+."), ExecConfig::default())
        .expect("Validation failed")
        .with_cancel_token(cancel);
    let result = interpreter.run();

    assert!(matches!(result, Err(RuntimeError::Cancelled { steps: 0 })));
    assert!(interpreter.output().is_empty());
}

#[test]
fn test_cancel_stops_infinite_loop() {
    for mode in MODES {
        let cancel = CancelToken::new();
        let remote = cancel.clone();

        let mut interpreter =
            Interpreter::new(Program::from("+[]"), ExecConfig::default().with_mode(mode))
                .expect("Validation failed")
                .with_cancel_token(cancel);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            remote.cancel();
        });

        let result = interpreter.run();
        handle.join().expect("Cancel thread panicked");

        assert!(matches!(result, Err(RuntimeError::Cancelled { .. })));
        assert!(interpreter.steps() > 0);
    }
}

#[test]
fn test_step_limit() {
    let config = ExecConfig {
        step_limit: Some(100),
        ..ExecConfig::default()
    };
    let err = run_with("+[]", config, Input::empty()).unwrap_err();
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::StepLimitExceeded { limit: 100 })
    ));

    // A program that finishes within the limit is unaffected
    let config = ExecConfig {
        step_limit: Some(2),
        ..ExecConfig::default()
    };
    assert_eq!(run_with("+.", config, Input::empty()).expect("Execution failed"), [1]);
}

#[test]
fn test_step_limit_counts_commands_in_both_modes() {
    for mode in MODES {
        let limited = |limit| ExecConfig {
            step_limit: Some(limit),
            ..ExecConfig::default().with_mode(mode)
        };

        // A folded run of three `+` is three steps, not one
        let err = run_with("+++.", limited(2), Input::empty()).unwrap_err();
        assert!(
            matches!(err, Error::Runtime(RuntimeError::StepLimitExceeded { limit: 2 })),
            "mode {:?}",
            mode
        );
        let err = run_with("+++.", limited(3), Input::empty()).unwrap_err();
        assert!(matches!(
            err,
            Error::Runtime(RuntimeError::StepLimitExceeded { limit: 3 })
        ));
        assert_eq!(
            run_with("+++.", limited(4), Input::empty()).expect("Execution failed"),
            [3]
        );

        // Trailing comments do not count toward the limit
        assert_eq!(
            run_with("+. end", limited(2), Input::empty()).expect("Execution failed"),
            [1]
        );
    }
}

#[test]
fn test_step_counts_agree_between_modes() {
    let steps: Vec<u64> = MODES
        .iter()
        .map(|&mode| {
            let mut interpreter =
                Interpreter::new(Program::from(HELLO_WORLD), ExecConfig::default().with_mode(mode))
                    .expect("Validation failed");
            interpreter.run().expect("Execution failed");
            interpreter.steps()
        })
        .collect();
    assert_eq!(steps[0], steps[1]);
}

#[test]
fn test_max_tape_len() {
    let config = ExecConfig {
        initial_tape_len: 8,
        max_tape_len: Some(16),
        ..ExecConfig::default()
    };
    let source = ">".repeat(16);
    let err = run_with(&source, config.clone(), Input::empty()).unwrap_err();
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::ResourceExhausted {
            resource: Resource::Tape,
            ..
        })
    ));

    // Cell 15 is still inside the cap
    let source = format!("{}+.", ">".repeat(15));
    assert_eq!(run_with(&source, config, Input::empty()).expect("Execution failed"), [1]);
}

#[test]
fn test_max_output_len() {
    let config = ExecConfig {
        max_output_len: Some(10),
        ..ExecConfig::default()
    };
    let mut interpreter = Interpreter::new(Program::from("+[.]"), config).expect("Validation failed");
    let result = interpreter.run();

    assert!(matches!(
        result,
        Err(RuntimeError::ResourceExhausted {
            resource: Resource::Output,
            requested: 11
        })
    ));
    assert_eq!(interpreter.output().len(), 10);
}

#[test]
fn test_trace_lines() {
    let trace = SharedBuffer::default();
    let config = ExecConfig::default().with_mode(ExecutionMode::Interpreted);

    let mut interpreter = Interpreter::new(Program::from("+ >.\n"), config)
        .expect("Validation failed")
        .with_trace(Box::new(trace.clone()));
    interpreter.run().expect("Execution failed");

    let text = String::from_utf8(trace.0.borrow().clone()).expect("Trace is not UTF-8");
    let lines: Vec<&str> = text.lines().collect();

    // Comment bytes produce no trace line
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "step 1 @0 '+' cursor=0 cells=[0:1] output=\"\"");
    assert_eq!(lines[1], "step 2 @2 '>' cursor=1 cells=[0:1] output=\"\"");
    assert_eq!(lines[2], "step 3 @3 '.' cursor=1 cells=[0:1] output=\"\\x00\"");
}

#[test]
fn test_trace_write_failure() {
    let mut interpreter = Interpreter::new(Program::from("+"), ExecConfig::default())
        .expect("Validation failed")
        .with_trace(Box::new(BrokenWriter));
    let result = interpreter.run();
    assert!(matches!(result, Err(RuntimeError::TraceWriteFailed { .. })));
}

#[test]
fn test_history_navigation() {
    let config = ExecConfig::default()
        .with_mode(ExecutionMode::Interpreted)
        .with_history(1024 * 1024);
    let mut interpreter = Interpreter::new(Program::from("++>+"), config).expect("Validation failed");
    interpreter.run().expect("Execution failed");

    // Initial snapshot plus one per command
    assert_eq!(interpreter.total_snapshots(), 5);
    assert_eq!(interpreter.history_position(), 4);
    assert!(interpreter.step_forward().is_err());

    interpreter.rewind_to_start().expect("Rewind failed");
    assert!(matches!(
        interpreter.step_backward(),
        Err(RuntimeError::HistoryUnavailable { .. })
    ));

    let start = interpreter.current_snapshot().expect("No snapshot");
    assert_eq!(start.step, 0);
    assert_eq!(start.position, None);
    assert!(start.cells.is_empty());

    interpreter.step_forward().expect("Step failed");
    interpreter.step_forward().expect("Step failed");
    let snap = interpreter.current_snapshot().expect("No snapshot");
    assert_eq!(snap.position, Some(1));
    assert_eq!(snap.command, Some(Command::Increment));
    assert_eq!(snap.cell(0), 2);

    interpreter.jump_to_end().expect("Jump failed");
    let end = interpreter.current_snapshot().expect("No snapshot");
    assert_eq!(end.cursor, 1);
    assert_eq!(end.cells, vec![(0, 2), (1, 1)]);
}

#[test]
fn test_history_output_prefix() {
    let config = ExecConfig::default().with_history(1024 * 1024);
    let mut interpreter =
        Interpreter::new(Program::from("+.+.+."), config).expect("Validation failed");
    interpreter.run().expect("Execution failed");

    let lengths: Vec<usize> = interpreter
        .snapshots()
        .iter()
        .map(|s| s.output_len)
        .collect();
    assert_eq!(lengths, vec![0, 0, 1, 1, 2, 2, 3]);
    assert_eq!(interpreter.output().as_bytes(), [1, 2, 3]);
}

#[test]
fn test_history_disabled_by_default() {
    let mut interpreter = Interpreter::new(Program::from("+++"), ExecConfig::default())
        .expect("Validation failed");
    interpreter.run().expect("Execution failed");
    assert_eq!(interpreter.total_snapshots(), 0);
    assert!(interpreter.current_snapshot().is_none());
    assert!(interpreter.rewind_to_start().is_err());
}

#[test]
fn test_snapshot_limit() {
    let config = ExecConfig::default().with_history(256);
    let source = "+>".repeat(100);
    let mut interpreter = Interpreter::new(Program::from(source.as_str()), config)
        .expect("Validation failed");
    let result = interpreter.run();
    assert!(matches!(
        result,
        Err(RuntimeError::SnapshotLimitExceeded { limit: 256, .. })
    ));
}

#[test]
fn test_generated_program_prints_text() {
    let texts: [&[u8]; 4] = [b"", b"Hello, bli!\n", &[0, 255, 1, 128, 127], b"zzz AAA"];
    for text in texts {
        let program = text_to_program(text);
        let output =
            bli::execute(program.as_bytes(), Input::empty()).expect("Generated program failed");
        assert_eq!(output.as_bytes(), text);
    }
}
