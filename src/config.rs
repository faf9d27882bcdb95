pub const DEFAULT_MAX_LINE_LENGTH: usize = 1000;
pub const DEFAULT_MAX_SEGMENTS: usize = 100;
pub const DEFAULT_MAX_WORDS: usize = 100;
pub const DEFAULT_MAX_WORD_LENGTH: usize = 200;
pub const DEFAULT_MAX_SOURCE_DEPTH: usize = 64;

/// Hard bound on `source` nesting, whatever `max_source_depth` says. Each level
/// recurses on the native stack.
pub const MAX_SOURCE_DEPTH_CEILING: usize = 1024;

/// Upper bounds on input size and script nesting.
///
/// Text limits are measured in characters. Input beyond them is dropped rather
/// than rejected; nesting beyond `max_source_depth` fails the `source` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_line_length: usize,
    pub max_segments: usize,
    pub max_words: usize,
    pub max_word_length: usize,
    pub max_source_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_segments: DEFAULT_MAX_SEGMENTS,
            max_words: DEFAULT_MAX_WORDS,
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
            max_source_depth: DEFAULT_MAX_SOURCE_DEPTH,
        }
    }
}
