use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::{self, BufRead, Cursor, ErrorKind, Write};
use std::rc::Rc;

use crate::status::ExitCode;
use crate::system::System;

/// Console sink whose contents stay readable after the interpreter takes it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console whose every write fails, like a closed pipe.
pub struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(ErrorKind::BrokenPipe, "console closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(ErrorKind::BrokenPipe, "console closed"))
    }
}

#[derive(Default)]
pub struct FakeState {
    /// Current directory, "" is the root.
    pub cwd: String,
    pub dirs: BTreeSet<String>,
    pub files: BTreeMap<String, Vec<u8>>,
    pub exit_codes: HashMap<String, ExitCode>,
    pub runs: Vec<Vec<String>>,
}

impl FakeState {
    fn path(&self, name: &str) -> String {
        if self.cwd.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.cwd, name)
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.dirs.contains(path) || self.files.contains_key(path)
    }
}

/// A filesystem rooted in memory, with programs that only record their calls.
#[derive(Clone, Default)]
pub struct FakeSystem {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file relative to the root.
    pub fn with_file(self, path: &str, contents: &str) -> Self {
        self.with_file_bytes(path, contents.as_bytes())
    }

    pub fn with_file_bytes(self, path: &str, contents: &[u8]) -> Self {
        self.state
            .borrow_mut()
            .files
            .insert(path.to_string(), contents.to_vec());
        self
    }

    pub fn with_dir(self, path: &str) -> Self {
        self.state.borrow_mut().dirs.insert(path.to_string());
        self
    }

    pub fn with_program(self, program: &str, code: ExitCode) -> Self {
        self.state
            .borrow_mut()
            .exit_codes
            .insert(program.to_string(), code);
        self
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.state.borrow().dirs.contains(path)
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.state.borrow().files.contains_key(path)
    }

    pub fn cwd(&self) -> String {
        self.state.borrow().cwd.clone()
    }

    pub fn runs(&self) -> Vec<Vec<String>> {
        self.state.borrow().runs.clone()
    }
}

impl System for FakeSystem {
    fn list_dir(&self) -> io::Result<Vec<String>> {
        let state = self.state.borrow();
        let prefix = state.path("");
        let names = state
            .dirs
            .iter()
            .chain(state.files.keys())
            .filter_map(|path| path.strip_prefix(prefix.as_str()))
            .filter(|name| !name.is_empty() && !name.contains('/'))
            .map(str::to_string)
            .collect();
        Ok(names)
    }

    fn make_dir(&mut self, name: &str) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        let path = state.path(name);
        if state.exists(&path) {
            return Err(io::Error::new(ErrorKind::AlreadyExists, path));
        }
        state.dirs.insert(path);
        Ok(())
    }

    fn create_file(&mut self, name: &str) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        let path = state.path(name);
        if state.dirs.contains(&path) {
            return Err(io::Error::new(ErrorKind::Other, "is a directory"));
        }
        state.files.insert(path, Vec::new());
        Ok(())
    }

    fn change_dir(&mut self, name: &str) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        let path = state.path(name);
        if !state.dirs.contains(&path) {
            return Err(io::Error::new(ErrorKind::NotFound, path));
        }
        state.cwd = path;
        Ok(())
    }

    fn open_script(&self, path: &str) -> io::Result<Box<dyn BufRead>> {
        let state = self.state.borrow();
        let contents = state
            .files
            .get(&state.path(path))
            .ok_or_else(|| io::Error::new(ErrorKind::NotFound, path.to_string()))?;
        Ok(Box::new(Cursor::new(contents.clone())))
    }

    fn run_process(&mut self, program: &str, args: &[String]) -> io::Result<ExitCode> {
        let mut state = self.state.borrow_mut();
        let code = *state
            .exit_codes
            .get(program)
            .ok_or_else(|| io::Error::new(ErrorKind::NotFound, program.to_string()))?;

        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        state.runs.push(call);

        Ok(code)
    }
}
