pub mod builtins;
pub mod cli;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod memory;
pub mod repl;
pub mod splitter;
pub mod status;
pub mod system;
pub mod tokenizer;

#[cfg(test)]
pub(crate) mod testing;
