use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::sync::OnceLock;

use log::{debug, warn};

use crate::error::CommandError;
use crate::interpreter::Interpreter;
use crate::status::{ExitCode, SUCCESS};

pub type Handler = fn(&mut Interpreter, &[String]) -> Result<ExitCode, CommandError>;

/// Word count a command accepts, counting the command name itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    /// Reported on a word count mismatch; `None` means "Unknown Command".
    pub bad_usage: Option<&'static str>,
    pub handler: Handler,
}

impl Builtin {
    pub fn usage_error(&self) -> CommandError {
        match self.bad_usage {
            Some(name) => CommandError::Bad(name),
            None => CommandError::Unknown,
        }
    }
}

pub static BUILTINS: [Builtin; 11] = [
    Builtin {
        name: "help",
        arity: Arity::Exactly(1),
        bad_usage: None,
        handler: help,
    },
    Builtin {
        name: "quit",
        arity: Arity::Exactly(1),
        bad_usage: None,
        handler: quit,
    },
    Builtin {
        name: "set",
        arity: Arity::Exactly(3),
        bad_usage: None,
        handler: set,
    },
    Builtin {
        name: "print",
        arity: Arity::Exactly(2),
        bad_usage: None,
        handler: print,
    },
    Builtin {
        name: "echo",
        arity: Arity::Exactly(2),
        bad_usage: None,
        handler: echo,
    },
    Builtin {
        name: "my_ls",
        arity: Arity::Exactly(1),
        bad_usage: None,
        handler: my_ls,
    },
    Builtin {
        name: "my_mkdir",
        arity: Arity::Exactly(2),
        bad_usage: None,
        handler: my_mkdir,
    },
    Builtin {
        name: "my_touch",
        arity: Arity::Exactly(2),
        bad_usage: None,
        handler: my_touch,
    },
    Builtin {
        name: "my_cd",
        arity: Arity::Exactly(2),
        bad_usage: Some("my_cd"),
        handler: my_cd,
    },
    Builtin {
        name: "source",
        arity: Arity::Exactly(2),
        bad_usage: None,
        handler: source,
    },
    Builtin {
        name: "run",
        arity: Arity::AtLeast(2),
        bad_usage: None,
        handler: run,
    },
];

pub const HELP_TEXT: &str = "\
COMMAND\t\t\tDESCRIPTION
help\t\t\tDisplays all the commands
quit\t\t\tExits / terminates the shell with \"Bye!\"
set VAR STRING\t\tAssigns a value to shell memory
print VAR\t\tDisplays the STRING assigned to VAR
echo STRING\t\tDisplays STRING or value of $VAR from shell memory
my_ls\t\t\tLists files and directories in current directory (alphabetical)
my_mkdir DIRNAME\tCreates a new directory (dirname or $VAR from shell memory)
my_touch FILENAME\tCreates a new empty file
my_cd DIRNAME\t\tChanges current directory
source SCRIPT.TXT\tExecutes the file SCRIPT.TXT
run COMMAND [ARGS...]\tRuns an external program and waits for it";

pub const NOT_FOUND: &str = "Variable does not exist";

pub const FAREWELL: &str = "Bye!";

fn table() -> &'static HashMap<&'static str, &'static Builtin> {
    static TABLE: OnceLock<HashMap<&'static str, &'static Builtin>> = OnceLock::new();
    TABLE.get_or_init(|| BUILTINS.iter().map(|b| (b.name, b)).collect())
}

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    table().get(name).copied()
}

/// Finds the builtin named by `words[0]` and checks the word count.
pub fn resolve(words: &[String]) -> Result<&'static Builtin, CommandError> {
    let name = words.first().ok_or(CommandError::Unknown)?;
    let builtin = lookup(name).ok_or(CommandError::Unknown)?;

    if !builtin.arity.accepts(words.len()) {
        return Err(builtin.usage_error());
    }

    Ok(builtin)
}

/// Non-empty and made only of ASCII letters and digits.
pub fn is_alphanumeric_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn help(shell: &mut Interpreter, _words: &[String]) -> Result<ExitCode, CommandError> {
    writeln!(shell.out, "{}", HELP_TEXT)?;
    Ok(SUCCESS)
}

fn quit(shell: &mut Interpreter, _words: &[String]) -> Result<ExitCode, CommandError> {
    shell.should_exit = true;

    if let Err(err) = writeln!(shell.out, "{}", FAREWELL).and_then(|_| shell.out.flush()) {
        warn!("failed to say goodbye: {}", err);
    }
    Ok(SUCCESS)
}

fn set(shell: &mut Interpreter, words: &[String]) -> Result<ExitCode, CommandError> {
    shell.memory.set(words[1].as_str(), words[2].as_str());
    Ok(SUCCESS)
}

fn print(shell: &mut Interpreter, words: &[String]) -> Result<ExitCode, CommandError> {
    let value = shell.memory.get(&words[1]).unwrap_or(NOT_FOUND);
    writeln!(shell.out, "{}", value)?;
    Ok(SUCCESS)
}

fn echo(shell: &mut Interpreter, words: &[String]) -> Result<ExitCode, CommandError> {
    let token = &words[1];
    let text = match token.strip_prefix('$') {
        Some(var) => shell.memory.get(var).unwrap_or_default(),
        None => token.as_str(),
    };
    writeln!(shell.out, "{}", text)?;
    Ok(SUCCESS)
}

fn my_ls(shell: &mut Interpreter, _words: &[String]) -> Result<ExitCode, CommandError> {
    let mut names = shell
        .system
        .list_dir()
        .map_err(|_| CommandError::Bad("my_ls"))?;
    names.push(".".to_string());
    names.push("..".to_string());

    // byte order: digits, then uppercase, then lowercase
    names.sort_unstable();

    for name in names {
        writeln!(shell.out, "{}", name)?;
    }
    Ok(SUCCESS)
}

fn my_mkdir(shell: &mut Interpreter, words: &[String]) -> Result<ExitCode, CommandError> {
    let name = match words[1].strip_prefix('$') {
        Some(var) => match shell.memory.get(var) {
            Some(value) if is_alphanumeric_token(value) => value.to_string(),
            _ => return Err(CommandError::Bad("my_mkdir")),
        },
        None => words[1].clone(),
    };

    match shell.system.make_dir(&name) {
        Ok(()) => Ok(SUCCESS),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            debug!("directory {} already exists", name);
            Ok(SUCCESS)
        }
        Err(err) => {
            debug!("my_mkdir {}: {}", name, err);
            Err(CommandError::Bad("my_mkdir"))
        }
    }
}

fn my_touch(shell: &mut Interpreter, words: &[String]) -> Result<ExitCode, CommandError> {
    let name = &words[1];
    if !is_alphanumeric_token(name) {
        return Err(CommandError::Unknown);
    }

    shell.system.create_file(name).map_err(|err| {
        debug!("my_touch {}: {}", name, err);
        CommandError::Bad("my_touch")
    })?;
    Ok(SUCCESS)
}

fn my_cd(shell: &mut Interpreter, words: &[String]) -> Result<ExitCode, CommandError> {
    let name = &words[1];
    if !is_alphanumeric_token(name) {
        return Err(CommandError::Bad("my_cd"));
    }

    shell.system.change_dir(name).map_err(|err| {
        debug!("my_cd {}: {}", name, err);
        CommandError::Bad("my_cd")
    })?;
    Ok(SUCCESS)
}

fn source(shell: &mut Interpreter, words: &[String]) -> Result<ExitCode, CommandError> {
    shell.run_script(&words[1])
}

fn run(shell: &mut Interpreter, words: &[String]) -> Result<ExitCode, CommandError> {
    // the child writes straight to the terminal
    shell.out.flush()?;

    shell
        .system
        .run_process(&words[1], &words[2..])
        .map_err(|err| {
            debug!("run {}: {}", words[1], err);
            CommandError::Bad("run")
        })
}
