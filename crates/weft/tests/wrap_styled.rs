//! Styled-text behavior: strip-invariance against the plain wrap, span
//! atomicity, and capability injection.
//!
//! The central promise: decorating text with control sequences changes
//! nothing about where lines break. Stripping the sequences back off a
//! wrapped styled text yields, line for line, the wrap of the plain text.

use weft::{
    CellWidth, Scanner, SequenceRecognizer, WidthPolicy, WrapOptions, strip_sequences,
    visible_length, wrap, wrap_with,
};

/// Style every non-space char with a rotating SGR attribute, the way a
/// colorful CLI does.
fn colorize(text: &str) -> String {
    const STYLES: [&str; 4] = ["\u{1b}[31m", "\u{1b}[1m", "\u{1b}[7m", "\u{1b}[41;37m"];
    let mut out = String::new();
    for (idx, ch) in text.chars().enumerate() {
        if ch == ' ' {
            out.push(ch);
        } else {
            out.push_str(STYLES[idx % STYLES.len()]);
            out.push(ch);
            out.push_str("\u{1b}[0m");
        }
    }
    out
}

fn all_option_combos() -> Vec<WrapOptions> {
    let mut combos = Vec::new();
    for break_long_words in [false, true] {
        for drop_whitespace in [false, true] {
            for indent in ["", " "] {
                combos.push(
                    WrapOptions::new()
                        .break_long_words(break_long_words)
                        .drop_whitespace(drop_whitespace)
                        .subsequent_indent(indent),
                );
            }
        }
    }
    combos
}

// ── Strip-invariance ────────────────────────────────────────────────────

#[test]
fn stripped_styled_wrap_equals_plain_wrap() {
    let pgraph = " Z! a bc defghij klmnopqrstuvw<<>>xyz012345678900 ".repeat(2);
    let colored = colorize(&pgraph);

    for width in [1usize, 10, 25] {
        for opts in all_option_combos() {
            let plain = wrap(&pgraph, width, &opts).unwrap();
            let styled = wrap(&colored, width, &opts).unwrap();
            assert_eq!(
                plain.len(),
                styled.len(),
                "line counts diverge at width {width} with {opts:?}"
            );
            for (left, right) in plain.iter().zip(&styled) {
                assert_eq!(
                    left,
                    &strip_sequences(right),
                    "visible content diverges at width {width} with {opts:?}"
                );
            }
        }
    }
}

#[test]
fn styled_lines_measure_within_budget() {
    let colored = colorize("the quick brown fox jumps over the lazy dog");
    for width in [5usize, 9, 16] {
        for line in wrap(&colored, width, &WrapOptions::new()).unwrap() {
            assert!(
                visible_length(&line) <= width,
                "{line:?} wider than {width}"
            );
        }
    }
}

// ── Span atomicity ──────────────────────────────────────────────────────

#[test]
fn every_sequence_lands_whole_on_exactly_one_line() {
    let colored = colorize("ab cdef ghij klmnopq");
    let scanner = Scanner::ansi();
    let total_in = scanner.locate(&colored).len();

    for width in [1usize, 3, 7, 40] {
        let lines = wrap(&colored, width, &WrapOptions::new()).unwrap();
        let total_out: usize = lines.iter().map(|line| scanner.locate(line).len()).sum();
        assert_eq!(total_in, total_out, "width {width} lost or split a span");
        // No line may end inside a sequence: stripping and re-measuring
        // must agree with the visible width.
        for line in &lines {
            assert_eq!(
                visible_length(line),
                scanner.visible_width(&scanner.strip(line))
            );
        }
    }
}

#[test]
fn long_word_cut_never_enters_a_sequence() {
    // A 12-char styled word cut at width 5: both codes survive complete.
    let styled = "\u{1b}[35mabcdefghijkl\u{1b}[0m";
    let lines = wrap(styled, 5, &WrapOptions::new()).unwrap();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("\u{1b}[35m"));
    assert!(lines[2].ends_with("\u{1b}[0m"));
    assert_eq!(strip_sequences(&lines.concat()), "abcdefghijkl");
}

// ── Zero-width and wide content under style ─────────────────────────────

#[test]
fn combining_marks_do_not_consume_budget() {
    let marked = format!("{}{}{}", "A".repeat(29), "\u{0301}".repeat(3), "A".repeat(3));
    let plain = "A".repeat(32);
    let wrapped_marked = wrap(&marked, 30, &WrapOptions::new()).unwrap();
    let wrapped_plain = wrap(&plain, 30, &WrapOptions::new()).unwrap();
    assert_eq!(wrapped_marked.len(), wrapped_plain.len());
    assert_eq!(wrapped_marked[1], wrapped_plain[1]);
    assert_eq!(wrapped_marked[0].matches('\u{0301}').count(), 3);
}

#[test]
fn styled_wide_chars_wrap_on_cell_width() {
    let styled = "\u{1b}[1m中文字\u{1b}[0m";
    let lines = wrap(styled, 4, &WrapOptions::new()).unwrap();
    assert_eq!(strip_sequences(&lines[0]), "中文");
    assert_eq!(strip_sequences(&lines[1]), "字");
}

// ── Capability injection ────────────────────────────────────────────────

/// Fake recognizer for a made-up terminal whose style codes are
/// `%{` ... `}` runs — nothing like ANSI.
#[derive(Clone, Copy, Default)]
struct PercentBrace;

impl SequenceRecognizer for PercentBrace {
    fn sequence_at(&self, text: &str, offset: usize) -> Option<usize> {
        let rest = &text.as_bytes()[offset..];
        if !rest.starts_with(b"%{") {
            return None;
        }
        rest.iter().position(|&b| b == b'}').map(|end| end + 1)
    }
}

#[test]
fn custom_recognizer_drives_the_same_engine() {
    let scanner = Scanner::new(PercentBrace, WidthPolicy::Standard);
    let styled = "%{red}hello%{reset} world";
    let lines = wrap_with(&scanner, styled, 5, &WrapOptions::new()).unwrap();
    assert_eq!(lines, vec!["%{red}hello%{reset}", "world"]);
    assert_eq!(scanner.visible_width(styled), 11);
    assert_eq!(scanner.strip(styled), "hello world");
}

/// Width fake that calls everything single-width, combining marks included.
#[derive(Clone, Copy, Default)]
struct AllOnes;

impl CellWidth for AllOnes {
    fn char_width(&self, _ch: char) -> usize {
        1
    }
}

#[test]
fn custom_width_policy_changes_measurement_only() {
    let scanner = Scanner::new(PercentBrace, AllOnes);
    // Under AllOnes a combining mark costs a cell.
    assert_eq!(scanner.visible_width("e\u{0301}"), 2);
    let lines = wrap_with(&scanner, "aa bb", 2, &WrapOptions::new()).unwrap();
    assert_eq!(lines, vec!["aa", "bb"]);
}
