use nu_ansi_term::{Color, Style};
use reedline::{
    Highlighter, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus,
    StyledText,
};
use std::borrow::Cow;

use crate::builtins::lookup;
use crate::splitter::SEPARATOR;

#[derive(Clone)]
pub struct REPLPrompt;

impl Prompt for REPLPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<str> {
        Cow::Borrowed("$ ")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("  ... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}

pub static COMMAND_COLOR: Color = Color::LightBlue;
pub static UNKNOWN_COLOR: Color = Color::Red;
pub static VARIABLE_COLOR: Color = Color::Yellow;
pub static DEFAULT_COLOR: Color = Color::White;
pub static SEPARATOR_COLOR: Color = Color::DarkGray;

/// Colors the first word of each command by whether it names a builtin.
pub struct SyntaxHighlighter;

impl Highlighter for SyntaxHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled_text = StyledText::new();
        let mut remaining = line;
        let mut at_command = true;

        while let Some(c) = remaining.chars().next() {
            if c == SEPARATOR {
                styled_text.push((Style::new().fg(SEPARATOR_COLOR), c.to_string()));
                remaining = &remaining[c.len_utf8()..];
                at_command = true;
                continue;
            }

            if c.is_whitespace() {
                let end = remaining
                    .find(|c: char| !c.is_whitespace())
                    .unwrap_or(remaining.len());
                styled_text.push((Style::new().fg(DEFAULT_COLOR), remaining[..end].to_string()));
                remaining = &remaining[end..];
                continue;
            }

            let end = remaining
                .find(|c: char| c.is_whitespace() || c == SEPARATOR)
                .unwrap_or(remaining.len());
            let word = &remaining[..end];

            let color = if at_command {
                if lookup(word).is_some() {
                    COMMAND_COLOR
                } else {
                    UNKNOWN_COLOR
                }
            } else if word.starts_with('$') {
                VARIABLE_COLOR
            } else {
                DEFAULT_COLOR
            };

            styled_text.push((Style::new().fg(color), word.to_string()));
            remaining = &remaining[end..];
            at_command = false;
        }

        styled_text
    }
}
