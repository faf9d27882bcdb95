use clap::Parser;
use dirs::home_dir;
use log::{debug, info, warn};
use mysh::{
    builtins::resolve,
    cli::{Args, Commands},
    config::Limits,
    error::Result,
    interpreter::Interpreter,
    repl::{REPLPrompt, SyntaxHighlighter},
    splitter::split_segments,
    status::{ExitCode, FAILURE, SUCCESS},
    tokenizer::tokenize,
};
use nu_ansi_term::{Color, Style};
use reedline::{DefaultHinter, FileBackedHistory, Reedline, Signal};
use std::{
    fs,
    io::{self, IsTerminal},
    path::PathBuf,
    process,
};

fn run_file(file: PathBuf, limits: Limits) -> ExitCode {
    let mut shell = Interpreter::host(limits);
    shell.source(&file.to_string_lossy())
}

fn check_file(file: PathBuf, limits: Limits) -> Result<usize> {
    let source = fs::read_to_string(&file)?;
    let mut problems = 0;

    for (number, line) in source.lines().enumerate() {
        for segment in split_segments(line, &limits) {
            let words = tokenize(segment, &limits);
            if let Err(err) = resolve(&words) {
                problems += 1;
                println!("{}:{}: {}: {}", file.display(), number + 1, segment, err);
            }
        }
    }

    Ok(problems)
}

fn run_batch(limits: Limits) -> Result<ExitCode> {
    let mut shell = Interpreter::host(limits);
    Ok(shell.run_session(io::stdin().lock())?)
}

fn run_repl(limits: Limits) -> Result<ExitCode> {
    let mut line_editor = Reedline::create()
        .with_hinter(Box::new(
            DefaultHinter::default().with_style(Style::new().italic().fg(Color::LightGray)),
        ))
        .with_highlighter(Box::new(SyntaxHighlighter));

    // Add file-backed history if possible
    if let Some(history) = home_dir()
        .map(|home| home.join(".mysh_history"))
        .and_then(|path| FileBackedHistory::with_file(100, path).ok())
        .map(Box::new)
    {
        line_editor = line_editor.with_history(history);
    } else {
        eprintln!("NOTE: Failed to load history. Persistence is now disabled.")
    }

    let prompt = REPLPrompt;
    let mut shell = Interpreter::host(limits);

    loop {
        match line_editor.read_line(&prompt)? {
            Signal::Success(buffer) => {
                if let Some(code) = shell.run_line(&buffer) {
                    break Ok(code);
                }
            }
            Signal::CtrlC => continue,
            Signal::CtrlD => break Ok(SUCCESS),
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let limits = Limits::from(&args.limits);
    debug!("limits: {:?}", limits);

    let code = match args.command {
        Some(Commands::Run { file }) => {
            info!("FILE MODE");
            debug!("file: {:?}", file);

            run_file(file, limits)
        }
        Some(Commands::Check { file }) => {
            info!("CHECK MODE");
            debug!("file: {:?}", file);

            match check_file(file, limits) {
                Ok(0) => SUCCESS,
                Ok(problems) => {
                    warn!("{} problem(s) found", problems);
                    FAILURE
                }
                Err(err) => {
                    eprintln!("{}", err);
                    FAILURE
                }
            }
        }
        Some(Commands::Repl) => {
            info!("REPL MODE");
            println!("mysh {}", env!("CARGO_PKG_VERSION"));

            run_repl(limits).unwrap_or_else(|err| {
                eprintln!("{}", err);
                FAILURE
            })
        }
        None => {
            println!("mysh {}", env!("CARGO_PKG_VERSION"));

            let result = if io::stdin().is_terminal() {
                info!("REPL MODE");
                run_repl(limits)
            } else {
                info!("BATCH MODE");
                run_batch(limits)
            };

            result.unwrap_or_else(|err| {
                eprintln!("{}", err);
                FAILURE
            })
        }
    };

    process::exit(code);
}
