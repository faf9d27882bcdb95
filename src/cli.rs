use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{
    Limits, DEFAULT_MAX_LINE_LENGTH, DEFAULT_MAX_SEGMENTS, DEFAULT_MAX_SOURCE_DEPTH,
    DEFAULT_MAX_WORDS, DEFAULT_MAX_WORD_LENGTH, MAX_SOURCE_DEPTH_CEILING,
};

#[derive(Parser, Debug)]
#[clap(version, about = "A small line-oriented command shell")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a script file and exit with its status
    Run {
        /// Path to the script
        file: PathBuf,
    },

    /// Report unknown commands and wrong argument counts without executing anything
    Check {
        /// Path to the script to check
        file: PathBuf,
    },

    /// Start an interactive session even when stdin is not a terminal
    Repl,
}

#[derive(clap::Args, Debug)]
pub struct LimitArgs {
    /// Characters kept from each input line
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_LINE_LENGTH)]
    pub max_line_length: usize,

    /// `;`-separated commands kept from each line
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_SEGMENTS)]
    pub max_segments: usize,

    /// Words kept from each command
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_WORDS)]
    pub max_words: usize,

    /// Characters kept from each word
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_WORD_LENGTH)]
    pub max_word_length: usize,

    /// How deeply `source` may nest, at most 1024
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_SOURCE_DEPTH, value_parser = parse_source_depth)]
    pub max_source_depth: usize,
}

fn parse_source_depth(s: &str) -> Result<usize, String> {
    let depth: usize = s.parse().map_err(|err| format!("{}", err))?;
    if depth > MAX_SOURCE_DEPTH_CEILING {
        return Err(format!("must be at most {}", MAX_SOURCE_DEPTH_CEILING));
    }
    Ok(depth)
}

impl From<&LimitArgs> for Limits {
    fn from(args: &LimitArgs) -> Self {
        Self {
            max_line_length: args.max_line_length,
            max_segments: args.max_segments,
            max_words: args.max_words,
            max_word_length: args.max_word_length,
            max_source_depth: args.max_source_depth,
        }
    }
}
