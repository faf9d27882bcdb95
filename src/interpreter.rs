use std::io::{self, BufRead, Write};

use log::{debug, warn};

use crate::builtins::resolve;
use crate::config::{Limits, MAX_SOURCE_DEPTH_CEILING};
use crate::error::CommandError;
use crate::memory::Memory;
use crate::splitter::{decode_line, split_segments};
use crate::status::{ExitCode, FATAL, SUCCESS};
use crate::system::{HostSystem, System};
use crate::tokenizer::tokenize;

/// A script being sourced, read one line at a time.
///
/// The reader is dropped, and the file closed, when the frame is popped.
pub struct ScriptFrame {
    pub path: String,
    reader: Box<dyn BufRead>,
    line_number: usize,
}

impl ScriptFrame {
    fn new(path: &str, reader: Box<dyn BufRead>) -> Self {
        Self {
            path: path.to_string(),
            reader,
            line_number: 0,
        }
    }

    /// Reads the next line, including a final line without a trailing newline.
    fn next_line(&mut self) -> Option<String> {
        let mut bytes = Vec::new();
        match self.reader.read_until(b'\n', &mut bytes) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                Some(decode_line(&bytes))
            }
            Err(err) => {
                warn!(
                    "{}: stopped reading after line {}: {}",
                    self.path, self.line_number, err
                );
                None
            }
        }
    }
}

/// Splits, tokenizes and dispatches lines against the shell memory and the
/// host system.
pub struct Interpreter {
    pub(crate) memory: Memory,
    pub(crate) system: Box<dyn System>,
    pub(crate) out: Box<dyn Write>,
    pub(crate) should_exit: bool,
    limits: Limits,
    scripts: Vec<ScriptFrame>,
}

impl Interpreter {
    pub fn new(system: Box<dyn System>, out: Box<dyn Write>, limits: Limits) -> Self {
        Self {
            memory: Memory::new(),
            system,
            out,
            should_exit: false,
            limits,
            scripts: Vec::new(),
        }
    }

    /// An interpreter on the real filesystem, printing to stdout.
    pub fn host(limits: Limits) -> Self {
        Self::new(Box::new(HostSystem), Box::new(io::stdout()), limits)
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Set once `quit` has run. No further commands are executed after that.
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Number of scripts currently being sourced.
    pub fn script_depth(&self) -> usize {
        self.scripts.len()
    }

    /// The status to end a session with after a top-level line returned `code`.
    ///
    /// `quit` ends it with 0 and a fatal code ends it with that code. Lines of
    /// a sourced script are not top-level, so a fatal code there does not stop
    /// the script.
    pub fn exit_status(&self, code: ExitCode) -> Option<ExitCode> {
        if self.should_exit {
            Some(SUCCESS)
        } else if code == FATAL {
            Some(FATAL)
        } else {
            None
        }
    }

    /// Executes a line read at the top level and returns the session status
    /// if the session has to end.
    pub fn run_line(&mut self, line: &str) -> Option<ExitCode> {
        let code = self.execute(line);
        self.exit_status(code)
    }

    /// Runs every line of `input` until EOF, `quit` or a fatal code.
    pub fn run_session(&mut self, input: impl BufRead) -> io::Result<ExitCode> {
        for bytes in input.split(b'\n') {
            if let Some(code) = self.run_line(&decode_line(&bytes?)) {
                return Ok(code);
            }
        }

        Ok(SUCCESS)
    }

    /// Runs every segment of `line` in order, stopping at the first failure.
    pub fn execute(&mut self, line: &str) -> ExitCode {
        let limits = self.limits;

        for segment in split_segments(line, &limits) {
            let words = tokenize(segment, &limits);
            let code = self.dispatch(&words);

            if code != SUCCESS || self.should_exit {
                return code;
            }
        }

        SUCCESS
    }

    /// Runs one command. Failures are reported on the console and returned as
    /// their exit code.
    pub fn dispatch(&mut self, words: &[String]) -> ExitCode {
        debug!("dispatch {:?}", words);

        let result = resolve(words).and_then(|builtin| (builtin.handler)(self, words));

        match result {
            Ok(code) => code,
            Err(err) => {
                if let Err(write_err) = writeln!(self.out, "{}", err) {
                    warn!("failed to report {:?}: {}", err, write_err);
                }
                err.exit_code()
            }
        }
    }

    /// Executes every line of the script at `path` and returns the last exit code.
    pub fn source(&mut self, path: &str) -> ExitCode {
        match self.run_script(path) {
            Ok(code) => code,
            Err(err) => {
                if let Err(write_err) = writeln!(self.out, "{}", err) {
                    warn!("failed to report {:?}: {}", err, write_err);
                }
                err.exit_code()
            }
        }
    }

    /// A failing line does not stop the lines after it; only `quit` does.
    pub(crate) fn run_script(&mut self, path: &str) -> Result<ExitCode, CommandError> {
        let max_depth = self.limits.max_source_depth.min(MAX_SOURCE_DEPTH_CEILING);
        if self.scripts.len() >= max_depth {
            warn!("{}: scripts nested deeper than {}", path, max_depth);
            return Err(CommandError::Bad("source"));
        }

        let reader = self.system.open_script(path).map_err(|err| {
            debug!("source {}: {}", path, err);
            CommandError::FileNotFound
        })?;

        let depth = self.scripts.len();
        self.scripts.push(ScriptFrame::new(path, reader));

        let mut code = SUCCESS;
        while let Some(line) = self.scripts[depth].next_line() {
            debug!(
                "{}:{}: {}",
                path,
                self.scripts[depth].line_number,
                line.trim_end()
            );

            code = self.execute(&line);
            if self.should_exit {
                break;
            }
        }

        self.scripts.truncate(depth);
        Ok(code)
    }
}
