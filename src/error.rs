use crate::status::{ExitCode, FAILURE, FILE_NOT_FOUND};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    IO(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single command. The `Display` text is what the user sees.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown Command")]
    Unknown,
    #[error("Bad command: {0}")]
    Bad(&'static str),
    #[error("Bad command: File not found")]
    FileNotFound,
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl CommandError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CommandError::FileNotFound => FILE_NOT_FOUND,
            _ => FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_codes() {
        assert_eq!(CommandError::Unknown.to_string(), "Unknown Command");
        assert_eq!(CommandError::Bad("my_cd").to_string(), "Bad command: my_cd");
        assert_eq!(
            CommandError::FileNotFound.to_string(),
            "Bad command: File not found"
        );

        assert_eq!(CommandError::Unknown.exit_code(), FAILURE);
        assert_eq!(CommandError::Bad("my_mkdir").exit_code(), FAILURE);
        assert_eq!(CommandError::FileNotFound.exit_code(), FILE_NOT_FOUND);
    }
}
