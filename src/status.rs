pub type ExitCode = i32;

pub const SUCCESS: ExitCode = 0;

/// Unknown command, bad usage or a resource failure.
pub const FAILURE: ExitCode = 1;

/// A sourced script could not be opened.
pub const FILE_NOT_FOUND: ExitCode = 3;

/// Terminates the process when it reaches the top-level loop.
pub const FATAL: ExitCode = 99;
