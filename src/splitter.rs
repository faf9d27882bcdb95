use log::warn;
use std::borrow::Cow;

use crate::config::Limits;

pub const SEPARATOR: char = ';';

/// Decodes raw line bytes, replacing invalid UTF-8 instead of rejecting the line.
pub fn decode_line(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(line) => line.to_string(),
        Cow::Owned(line) => {
            warn!("line is not valid UTF-8, replacing invalid bytes");
            line
        }
    }
}

/// Cuts the line at the first carriage return or newline and caps its length.
pub fn normalize_line<'a>(line: &'a str, limits: &Limits) -> &'a str {
    let line = line.split(['\r', '\n']).next().unwrap_or_default();
    let capped = truncate_chars(line, limits.max_line_length);

    if capped.len() < line.len() {
        warn!(
            "line longer than {} characters, dropping the rest",
            limits.max_line_length
        );
    }

    capped
}

/// Splits a line into trimmed, non-empty segments on `;`.
///
/// Empty segments still count toward `max_segments`, since the cap bounds the
/// raw split rather than the executable result.
pub fn split_segments<'a>(line: &'a str, limits: &Limits) -> Vec<&'a str> {
    let line = normalize_line(line, limits);
    let mut segments = Vec::new();
    let mut start = 0;
    let mut seen = 0;

    for (index, c) in line.char_indices() {
        if c != SEPARATOR {
            continue;
        }

        if !push_segment(&mut segments, &mut seen, &line[start..index], limits) {
            return segments;
        }
        start = index + c.len_utf8();
    }

    // trailing segment, with or without a final separator
    push_segment(&mut segments, &mut seen, &line[start..], limits);

    segments
}

fn push_segment<'a>(
    segments: &mut Vec<&'a str>,
    seen: &mut usize,
    raw: &'a str,
    limits: &Limits,
) -> bool {
    let segment = raw.trim();

    if *seen >= limits.max_segments {
        if segment.is_empty() {
            return false;
        }
        warn!(
            "more than {} segments on one line, dropping the rest",
            limits.max_segments
        );
        return false;
    }
    *seen += 1;

    if !segment.is_empty() {
        segments.push(segment);
    }

    true
}

/// Returns the longest prefix of `s` holding at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<&str> {
        split_segments(line, &Limits::default())
    }

    #[test]
    fn test_single_segment() {
        assert_eq!(split("set A 1"), vec!["set A 1"]);
        assert_eq!(split("   print A \t"), vec!["print A"]);
    }

    #[test]
    fn test_multiple_segments() {
        assert_eq!(split("set A 1;print A"), vec!["set A 1", "print A"]);
        assert_eq!(
            split(" echo a ;  echo b;echo c "),
            vec!["echo a", "echo b", "echo c"]
        );
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        assert!(split("").is_empty());
        assert!(split("   \t ").is_empty());
        assert!(split(";;").is_empty());
        assert_eq!(split(";echo a;; ;echo b;"), vec!["echo a", "echo b"]);
    }

    #[test]
    fn test_line_endings_are_stripped() {
        assert_eq!(split("echo a\n"), vec!["echo a"]);
        assert_eq!(split("echo a\r\n"), vec!["echo a"]);
        // everything after the first line break is ignored
        assert_eq!(split("echo a\necho b"), vec!["echo a"]);
    }

    #[test]
    fn test_segments_never_contain_separator() {
        for segment in split("a;b c;;d ; e f g;") {
            assert!(!segment.contains(SEPARATOR));
            assert_eq!(segment, segment.trim());
        }
    }

    #[test]
    fn test_segment_limit() {
        let limits = Limits {
            max_segments: 2,
            ..Limits::default()
        };
        assert_eq!(
            split_segments("echo a;echo b;echo c", &limits),
            vec!["echo a", "echo b"]
        );
        // empty raw segments use up the budget too
        assert_eq!(split_segments(";;echo c", &limits), Vec::<&str>::new());
    }

    #[test]
    fn test_line_length_limit() {
        let limits = Limits {
            max_line_length: 8,
            ..Limits::default()
        };
        assert_eq!(split_segments("echo abcdef", &limits), vec!["echo abc"]);
        assert_eq!(normalize_line("héllo wörld", &limits), "héllo wö");
    }

    #[test]
    fn test_decode_line() {
        assert_eq!(decode_line(b"echo cafe"), "echo cafe");
        assert_eq!(decode_line(b"echo caf\xe9"), "echo caf\u{fffd}");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abc", 0), "");
        assert_eq!(truncate_chars("abc", 2), "ab");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("ääb", 2), "ää");
    }
}
