#![forbid(unsafe_code)]

//! Sequence-aware terminal text wrapping.
//!
//! Styled terminal text interleaves zero-width control sequences (colors,
//! emphasis, hyperlinks) with printable codepoints of varying cell width.
//! Wrap such text with a byte- or char-counting wrapper and the breaks land
//! in the wrong places — or worse, inside a sequence. Weft wraps the
//! *visible* content, producing exactly the line breaks a plain-text wrapper
//! would, while every control sequence travels intact with the word it
//! decorates.
//!
//! # How it fits together
//! - [`wrap`] splits input on newlines and wraps each line independently,
//!   preserving blank lines as empty output lines.
//! - [`Scanner`] bundles the two injected capabilities — a
//!   [`SequenceRecognizer`] saying where sequences begin and how far they
//!   run, and a [`CellWidth`] policy giving each codepoint its 0/1/2 cell
//!   width. [`wrap_with`] accepts a custom scanner; [`wrap`] uses the stock
//!   ANSI stack.
//! - [`strip_sequences`] and [`visible_length`] expose the measurement
//!   primitives for callers comparing or aligning rendered text.
//!
//! # Example
//! ```
//! use weft::{WrapOptions, wrap};
//!
//! let styled = "\u{1b}[31mred\u{1b}[0m and plain words";
//! let lines = wrap(styled, 10, &WrapOptions::new())?;
//! assert_eq!(lines, vec!["\u{1b}[31mred\u{1b}[0m and", "plain", "words"]);
//! # Ok::<(), weft::WrapError>(())
//! ```

pub mod error;
pub mod scan;
pub mod wrap;

pub use error::{WidthArg, WrapError};
pub use scan::{ControlSpan, Scanner};
pub use weft_core::{AnsiRecognizer, CellWidth, NullRecognizer, SequenceRecognizer, WidthPolicy};
pub use wrap::WrapOptions;

/// Wrap `text` to `width` cells using the stock ANSI capability stack.
///
/// Input splits at newlines; each line wraps independently (no paragraph
/// merging), and a line that is empty or whitespace-only yields exactly one
/// empty output line. Results concatenate in order.
///
/// # Errors
/// [`WrapError::InvalidWidth`] when `width` is zero or negative; the message
/// carries the offending value and its type.
pub fn wrap(
    text: &str,
    width: impl WidthArg,
    options: &WrapOptions,
) -> Result<Vec<String>, WrapError> {
    wrap_with(&Scanner::ansi(), text, width, options)
}

/// [`wrap`] with injected recognizer and width capabilities.
///
/// # Errors
/// [`WrapError::InvalidWidth`] when `width` is zero or negative.
pub fn wrap_with<R: SequenceRecognizer, W: CellWidth>(
    scanner: &Scanner<R, W>,
    text: &str,
    width: impl WidthArg,
    options: &WrapOptions,
) -> Result<Vec<String>, WrapError> {
    let width = width.into_width()?;
    let mut lines = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrap::wrap_line(scanner, line, width, options));
        }
    }
    Ok(lines)
}

/// Remove every recognized control sequence, leaving visible content only.
///
/// Uses the stock ANSI stack; for a custom recognizer use
/// [`Scanner::strip`].
#[must_use]
pub fn strip_sequences(text: &str) -> String {
    Scanner::ansi().strip(text)
}

/// Visible cell width of `text`: sequences and zero-width codepoints count
/// for nothing.
///
/// Uses the stock ANSI stack; for a custom recognizer use
/// [`Scanner::visible_width`].
#[must_use]
pub fn visible_length(text: &str) -> usize {
    Scanner::ansi().visible_width(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Orchestration ───────────────────────────────────────────────────

    #[test]
    fn empty_input_produces_no_lines() {
        assert_eq!(wrap("", 10, &WrapOptions::new()).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn blank_lines_are_preserved_as_empty_strings() {
        let lines = wrap("a\n\nb", 10, &WrapOptions::new()).unwrap();
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn whitespace_only_lines_collapse_to_empty() {
        let lines = wrap("a\n   \nb", 10, &WrapOptions::new()).unwrap();
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn lines_wrap_independently() {
        let lines = wrap("aa bb\ncc dd", 5, &WrapOptions::new()).unwrap();
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn invalid_width_fails_before_any_work() {
        let err = wrap("text", -3, &WrapOptions::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid width -3(<i32>) (must be integer > 0)"
        );
    }

    // ── Measurement primitives ──────────────────────────────────────────

    #[test]
    fn strip_sequences_projects_visible_content() {
        assert_eq!(strip_sequences("\u{1b}[1mhi\u{1b}[0m"), "hi");
    }

    #[test]
    fn visible_length_measures_cells() {
        assert_eq!(visible_length("\u{1b}[31m中\u{1b}[0m!"), 3);
    }
}
