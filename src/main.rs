// bli: Brainfuck interpreter with an optional time-travel TUI

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bli::interpreter::config::{EofPolicy, ExecConfig, ExecutionMode};
use bli::interpreter::constants::{DEFAULT_SNAPSHOT_LIMIT, INITIAL_TAPE_LEN};
use bli::interpreter::engine::Interpreter;
use bli::interpreter::errors::RuntimeError;
use bli::interpreter::input::Input;
use bli::parser::program::Program;
use bli::ui::App;
use bli::Error;

#[derive(Parser, Debug)]
#[command(name = "bli")]
#[command(about = "Run a Brainfuck program", version)]
struct Cli {
    /// Program file (read from stdin when absent)
    file: Option<PathBuf>,

    /// Print a state dump after every instruction to stderr
    #[arg(short, long)]
    step: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Run the program, then browse its execution in a terminal UI
    #[arg(long)]
    tui: bool,

    /// Walk the source directly instead of folded instructions
    #[arg(long)]
    disable_optimizations: bool,

    /// Never read stdin for `,`
    #[arg(long)]
    no_interaction: bool,

    /// Bytes supplied to `,` before stdin
    #[arg(long, value_name = "TEXT")]
    args: Option<String>,

    /// What `,` stores at end of input
    #[arg(long, value_enum, default_value_t = EofPolicy::Unchanged)]
    eof: EofPolicy,

    /// Initial tape length in cells
    #[arg(long, default_value_t = INITIAL_TAPE_LEN)]
    tape_size: usize,

    /// Maximum tape length in cells
    #[arg(long, value_name = "N")]
    max_tape: Option<usize>,

    /// Stop after this many executed instructions
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,
}

impl Cli {
    fn exec_config(&self) -> ExecConfig {
        let mode = if self.disable_optimizations {
            ExecutionMode::Interpreted
        } else {
            ExecutionMode::Compiled
        };

        let mut config = ExecConfig {
            initial_tape_len: self.tape_size,
            max_tape_len: self.max_tape,
            step_limit: self.max_steps,
            ..ExecConfig::default()
        }
        .with_mode(mode)
        .with_eof_policy(self.eof);

        if self.tui {
            config = config.with_history(DEFAULT_SNAPSHOT_LIMIT);
        }
        config
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "bli=debug" } else { "bli=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Why the program text could not be loaded
#[derive(Debug, thiserror::Error)]
enum SourceError {
    #[error("No input file provided and stdin is a terminal")]
    StdinIsTerminal,

    #[error("Failed to read '{}': {}", .path.display(), .source)]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read program from stdin: {source}")]
    Stdin {
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    /// Usage errors exit with 2, I/O failures with 1
    fn exit_code(&self) -> u8 {
        match self {
            SourceError::StdinIsTerminal => 2,
            SourceError::File { .. } | SourceError::Stdin { .. } => 1,
        }
    }
}

/// Program text from `file`, or all of stdin
fn read_source(file: Option<&PathBuf>) -> Result<Vec<u8>, SourceError> {
    match file {
        Some(path) => fs::read(path).map_err(|source| SourceError::File {
            path: path.clone(),
            source,
        }),
        None => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(SourceError::StdinIsTerminal);
            }
            let mut source = Vec::new();
            stdin
                .read_to_end(&mut source)
                .map_err(|source| SourceError::Stdin { source })?;
            Ok(source)
        }
    }
}

fn write_output(interpreter: &Interpreter) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    interpreter.output().flush_to(&mut stdout)?;
    stdout.flush()
}

fn run_tui(interpreter: Interpreter, run_error: Option<&RuntimeError>) -> io::Result<Interpreter> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(interpreter, run_error);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map(|()| app.interpreter)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let source = match read_source(cli.file.as_ref()) {
        Ok(source) => source,
        Err(e) => {
            error!("{}", e);
            if matches!(e, SourceError::StdinIsTerminal) {
                eprintln!("Usage: bli [FILE]   (or pipe a program on stdin)");
            }
            return ExitCode::from(e.exit_code());
        }
    };
    let program_from_stdin = cli.file.is_none();

    let program = Program::new(source);
    let mut interpreter = match Interpreter::new(program.clone(), cli.exec_config()) {
        Ok(interpreter) => interpreter,
        Err(Error::Validation(e)) => {
            let location = program.location_of(e.position());
            error!("Validation error at {}: {}", location, e);
            return ExitCode::FAILURE;
        }
        Err(Error::Runtime(e)) => {
            error!("Failed to prepare execution: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut input = if cli.no_interaction || program_from_stdin {
        Input::empty()
    } else {
        Input::from_reader(io::stdin())
    };
    if let Some(args) = &cli.args {
        input = input.with_preset(args.as_bytes());
    }
    interpreter = interpreter.with_input(input);

    if cli.step {
        interpreter = interpreter.with_trace(Box::new(io::BufWriter::new(io::stderr())));
    }

    let result = interpreter.run();

    if cli.tui {
        info!(snapshots = interpreter.total_snapshots(), "entering TUI");
        interpreter = match run_tui(interpreter, result.as_ref().err()) {
            Ok(interpreter) => interpreter,
            Err(e) => {
                error!("Terminal error: {}", e);
                return ExitCode::FAILURE;
            }
        };
    }

    // Partial output is still written when the run failed
    if let Err(e) = write_output(&interpreter) {
        error!("Failed to write output: {}", e);
        return ExitCode::FAILURE;
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let location = e
                .position()
                .map(|p| format!(" at {}", interpreter.program().location_of(p)))
                .unwrap_or_default();
            error!("Runtime error{}: {}", location, e);
            ExitCode::FAILURE
        }
    }
}
