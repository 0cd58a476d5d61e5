// bfgen: print a Brainfuck program whose output is the text read from stdin

use std::io::{self, Read, Write};
use std::process::ExitCode;

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut text = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut text) {
        error!("Failed to read stdin: {}", e);
        return ExitCode::FAILURE;
    }

    let program = bli::codegen::text_to_program(&text);
    debug!(input_bytes = text.len(), program_len = program.len(), "program generated");

    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", program).and_then(|()| stdout.flush()) {
        error!("Failed to write program: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
