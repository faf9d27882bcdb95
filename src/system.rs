use std::env;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::process::Command;

use crate::status::{ExitCode, FAILURE};

/// Filesystem and process access used by the built-in commands.
///
/// Callers only see success or failure, plus the exit status of a child
/// process. [`HostSystem`] talks to the real operating system.
pub trait System {
    /// Names of the entries in the current directory, excluding `.` and `..`.
    fn list_dir(&self) -> io::Result<Vec<String>>;

    /// Creates a directory. Fails with `ErrorKind::AlreadyExists` if it is there.
    fn make_dir(&mut self, name: &str) -> io::Result<()>;

    /// Creates an empty file, truncating an existing one.
    fn create_file(&mut self, name: &str) -> io::Result<()>;

    fn change_dir(&mut self, name: &str) -> io::Result<()>;

    fn open_script(&self, path: &str) -> io::Result<Box<dyn BufRead>>;

    /// Runs `program` with `args` and waits for it to exit.
    fn run_process(&mut self, program: &str, args: &[String]) -> io::Result<ExitCode>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HostSystem;

impl System for HostSystem {
    fn list_dir(&self) -> io::Result<Vec<String>> {
        fs::read_dir(".")?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect()
    }

    fn make_dir(&mut self, name: &str) -> io::Result<()> {
        fs::create_dir(name)
    }

    fn create_file(&mut self, name: &str) -> io::Result<()> {
        File::create(name).map(|_| ())
    }

    fn change_dir(&mut self, name: &str) -> io::Result<()> {
        env::set_current_dir(name)
    }

    fn open_script(&self, path: &str) -> io::Result<Box<dyn BufRead>> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }

    fn run_process(&mut self, program: &str, args: &[String]) -> io::Result<ExitCode> {
        let status = Command::new(program).args(args).status()?;

        // killed by a signal
        Ok(status.code().unwrap_or(FAILURE))
    }
}
