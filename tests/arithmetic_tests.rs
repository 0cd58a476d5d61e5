use bli::interpreter::config::{ExecConfig, ExecutionMode};
use bli::interpreter::constants::INITIAL_TAPE_LEN;
use bli::interpreter::engine::Interpreter;
use bli::parser::program::Program;

fn interpreter(source: &str, mode: ExecutionMode) -> Interpreter {
    Interpreter::new(Program::from(source), ExecConfig::default().with_mode(mode))
        .expect("Validation failed")
}

#[test]
fn test_increment_wraps() {
    for mode in [ExecutionMode::Interpreted, ExecutionMode::Compiled] {
        for k in [0usize, 1, 255, 256, 257, 512] {
            let source = format!("{}.", "+".repeat(k));
            let mut interpreter = interpreter(&source, mode);
            interpreter.run().expect("Execution failed");
            assert_eq!(
                interpreter.output().as_bytes(),
                [(k % 256) as u8],
                "{} increments in {:?} mode",
                k,
                mode
            );
        }
    }
}

#[test]
fn test_decrement_wraps() {
    for mode in [ExecutionMode::Interpreted, ExecutionMode::Compiled] {
        let mut interpreter = interpreter("-.--.", mode);
        interpreter.run().expect("Execution failed");
        assert_eq!(interpreter.output().as_bytes(), [255, 253]);
    }
}

#[test]
fn test_mixed_runs_cancel_out() {
    let mut interpreter = interpreter("+++--+-.", ExecutionMode::Compiled);
    interpreter.run().expect("Execution failed");
    assert_eq!(interpreter.output().as_bytes(), [1]);
}

#[test]
fn test_move_loop() {
    for mode in [ExecutionMode::Interpreted, ExecutionMode::Compiled] {
        let mut interpreter = interpreter("[->+<]", mode);
        interpreter.tape_mut().set_current(5);
        interpreter.run().expect("Execution failed");

        assert_eq!(interpreter.tape().read(0), 0);
        assert_eq!(interpreter.tape().read(1), 5);
        assert_eq!(interpreter.tape().cursor(), 0);
    }
}

#[test]
fn test_loop_body_runs_once_per_count() {
    let config = ExecConfig::default()
        .with_mode(ExecutionMode::Interpreted)
        .with_history(16 * 1024 * 1024);
    let mut interpreter =
        Interpreter::new(Program::from("[->+<]"), config).expect("Validation failed");
    interpreter.tape_mut().set_current(5);
    interpreter.run().expect("Execution failed");

    // The `-` at position 1 is the first command of the body
    let decrements = interpreter
        .snapshots()
        .iter()
        .filter(|s| s.position == Some(1))
        .count();
    assert_eq!(decrements, 5);
    // `[` once, body 4 commands plus `]` five times
    assert_eq!(interpreter.steps(), 1 + 5 * 5);
}

#[test]
fn test_skipped_loop() {
    for mode in [ExecutionMode::Interpreted, ExecutionMode::Compiled] {
        let mut interpreter = interpreter("[.+++.]+.", mode);
        interpreter.run().expect("Execution failed");
        assert_eq!(interpreter.output().as_bytes(), [1]);
    }
}

#[test]
fn test_multiplication() {
    // 7 * 9 = 63
    for mode in [ExecutionMode::Interpreted, ExecutionMode::Compiled] {
        let mut interpreter = interpreter("+++++++[>+++++++++<-]>.", mode);
        interpreter.run().expect("Execution failed");
        assert_eq!(interpreter.output().as_bytes(), [63]);
    }
}

#[test]
fn test_nested_loops() {
    // 4 * 4 * 4 = 64
    for mode in [ExecutionMode::Interpreted, ExecutionMode::Compiled] {
        let mut interpreter = interpreter("++++[>++++[>++++<-]<-]>>.", mode);
        interpreter.run().expect("Execution failed");
        assert_eq!(interpreter.output().as_bytes(), [64]);
    }
}

#[test]
fn test_tape_doubles_past_initial_length() {
    for mode in [ExecutionMode::Interpreted, ExecutionMode::Compiled] {
        let source = format!("{}+.", ">".repeat(INITIAL_TAPE_LEN));
        let mut interpreter = interpreter(&source, mode);
        interpreter.run().expect("Execution failed");

        assert_eq!(interpreter.output().as_bytes(), [1]);
        assert_eq!(interpreter.tape().len(), INITIAL_TAPE_LEN * 2);
        assert_eq!(interpreter.tape().cursor(), INITIAL_TAPE_LEN);
    }
}

#[test]
fn test_growth_keeps_existing_cells() {
    let config = ExecConfig {
        initial_tape_len: 2,
        ..ExecConfig::default()
    };
    let mut interpreter =
        Interpreter::new(Program::from("+>++>+++>++++<<<.>.>.>."), config)
            .expect("Validation failed");
    interpreter.run().expect("Execution failed");

    assert_eq!(interpreter.output().as_bytes(), [1, 2, 3, 4]);
    assert_eq!(interpreter.tape().len(), 4);
}

#[test]
fn test_clear_cell_idiom() {
    let mut interpreter = interpreter("+++++[-]-.", ExecutionMode::Compiled);
    interpreter.run().expect("Execution failed");
    assert_eq!(interpreter.output().as_bytes(), [255]);
}
