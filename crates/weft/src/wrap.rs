#![forbid(unsafe_code)]

//! Sequence-aware line wrapping.
//!
//! One line of input (no newlines) is tokenized into alternating word and
//! whitespace runs, each word carrying the control sequences that decorate
//! it, then packed greedily into output lines under a visible-width budget.
//! The packing reproduces the classic greedy wrapper's decisions exactly —
//! tie at the full budget stays on the line, dropped whitespace at breaks,
//! largest-fitting-prefix cuts for overlong words, the lone oversized token
//! when breaking is off — so styled text breaks precisely where its plain
//! counterpart would.

use std::collections::VecDeque;

use smallvec::SmallVec;
use weft_core::{CellWidth, SequenceRecognizer};

use crate::scan::{ControlSpan, Scanner, Segment};

/// Options for sequence-aware wrapping.
///
/// # Example
/// ```
/// use weft::WrapOptions;
///
/// let options = WrapOptions::new()
///     .break_long_words(false)
///     .subsequent_indent("  ");
/// ```
#[derive(Debug, Clone)]
pub struct WrapOptions {
    /// Cut words wider than the budget at the largest fitting prefix.
    /// When off, an oversized word stands alone on an overlong line.
    pub break_long_words: bool,
    /// Discard whitespace runs that land at a line break, and trailing
    /// whitespace on every produced line.
    pub drop_whitespace: bool,
    /// Prefix for the first output line; its visible width counts against
    /// that line's budget.
    pub initial_indent: String,
    /// Prefix for every output line after the first.
    pub subsequent_indent: String,
}

impl WrapOptions {
    /// Default options: break long words, drop whitespace, no indents.
    #[must_use]
    pub fn new() -> Self {
        Self {
            break_long_words: true,
            drop_whitespace: true,
            initial_indent: String::new(),
            subsequent_indent: String::new(),
        }
    }

    /// Set whether overlong words are cut to fit.
    #[must_use]
    pub fn break_long_words(mut self, on: bool) -> Self {
        self.break_long_words = on;
        self
    }

    /// Set whether whitespace at line breaks is discarded.
    #[must_use]
    pub fn drop_whitespace(mut self, on: bool) -> Self {
        self.drop_whitespace = on;
        self
    }

    /// Set the first-line prefix.
    #[must_use]
    pub fn initial_indent(mut self, indent: impl Into<String>) -> Self {
        self.initial_indent = indent.into();
        self
    }

    /// Set the continuation-line prefix.
    #[must_use]
    pub fn subsequent_indent(mut self, indent: impl Into<String>) -> Self {
        self.subsequent_indent = indent.into();
        self
    }
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A maximal run of whitespace or non-whitespace, plus attached sequences.
#[derive(Debug, Clone)]
struct Token {
    /// Rendered content: printable codepoints and attached sequences.
    raw: String,
    /// Visible cell width; sequences contribute nothing.
    width: usize,
    /// Whether the printable content is whitespace.
    is_whitespace: bool,
    /// Attached sequences, byte ranges relative to `raw`.
    spans: SmallVec<[ControlSpan; 2]>,
}

impl Token {
    fn new(is_whitespace: bool) -> Self {
        Self {
            raw: String::new(),
            width: 0,
            is_whitespace,
            spans: SmallVec::new(),
        }
    }

    fn push_char(&mut self, ch: char, width: usize) {
        self.raw.push(ch);
        self.width += width;
    }

    fn push_span(&mut self, seq: &str) {
        let start = self.raw.len();
        self.raw.push_str(seq);
        self.spans.push(ControlSpan {
            start,
            end: self.raw.len(),
        });
    }
}

/// Split one newline-free line into tokens.
///
/// Sequences attach by adjacency: a run of sequences touching a word's
/// printable content travels with that word, whether it opens the word or
/// closes it. A sequence isolated in whitespace waits for the next word; a
/// trailing sequence with no word after it rides the last word seen, where
/// whitespace dropping cannot discard it. A line of nothing but sequences
/// becomes a single zero-width word token.
fn tokenize<R: SequenceRecognizer, W: CellWidth>(
    scanner: &Scanner<R, W>,
    line: &str,
) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut current: Option<Token> = None;
    let mut pending: Vec<&str> = Vec::new();

    scanner.walk(line, |segment| match segment {
        Segment::Sequence(span) => {
            let seq = &line[span.start..span.end];
            match current.as_mut() {
                Some(tok) if !tok.is_whitespace => tok.push_span(seq),
                _ => pending.push(seq),
            }
        }
        Segment::Char(ch, width) => {
            let is_ws = ch.is_whitespace();
            let continues = matches!(&current, Some(tok) if tok.is_whitespace == is_ws);
            if !continues {
                if let Some(tok) = current.take() {
                    tokens.push(tok);
                }
                let mut tok = Token::new(is_ws);
                if !is_ws {
                    for seq in pending.drain(..) {
                        tok.push_span(seq);
                    }
                }
                current = Some(tok);
            }
            if let Some(tok) = current.as_mut() {
                tok.push_char(ch, width);
            }
        }
    });

    if let Some(tok) = current.take() {
        tokens.push(tok);
    }

    if !pending.is_empty() {
        if let Some(tok) = tokens.iter_mut().rev().find(|tok| !tok.is_whitespace) {
            for seq in pending.drain(..) {
                tok.push_span(seq);
            }
        } else {
            let mut tok = Token::new(false);
            for seq in pending.drain(..) {
                tok.push_span(seq);
            }
            tokens.push(tok);
        }
    }

    tokens
}

/// Wrap one newline-free line into rendered output lines.
///
/// The caller (the top-level `wrap`) has already validated the width and
/// short-circuited blank lines.
pub(crate) fn wrap_line<R: SequenceRecognizer, W: CellWidth>(
    scanner: &Scanner<R, W>,
    line: &str,
    width: usize,
    options: &WrapOptions,
) -> Vec<String> {
    let mut queue: VecDeque<Token> = tokenize(scanner, line).into();
    let mut lines: Vec<String> = Vec::new();

    while !queue.is_empty() {
        let indent = if lines.is_empty() {
            options.initial_indent.as_str()
        } else {
            options.subsequent_indent.as_str()
        };
        // The budget may go negative when the indent is wider than the
        // target; capacity then floors at one cell per pass below.
        let budget = width as i64 - scanner.visible_width(indent) as i64;

        // Whitespace that lands at a break point opens the next line; it
        // vanishes rather than indenting the continuation.
        if options.drop_whitespace
            && !lines.is_empty()
            && queue.front().is_some_and(|tok| tok.is_whitespace)
        {
            queue.pop_front();
        }

        let mut current: Vec<Token> = Vec::new();
        let mut current_width: i64 = 0;

        while let Some(front) = queue.front() {
            let w = front.width as i64;
            if current_width + w > budget {
                break;
            }
            current_width += w;
            if let Some(tok) = queue.pop_front() {
                current.push(tok);
            }
        }

        // The next token on its own overflows a whole line: cut it, or let
        // it stand alone oversized when breaking is off.
        if queue.front().is_some_and(|tok| tok.width as i64 > budget) {
            handle_long_token(
                scanner,
                &mut queue,
                &mut current,
                current_width,
                budget,
                options.break_long_words,
            );
        }

        if options.drop_whitespace && current.last().is_some_and(|tok| tok.is_whitespace) {
            current.pop();
        }

        if !current.is_empty() {
            let content: usize = current.iter().map(|tok| tok.raw.len()).sum();
            let mut rendered = String::with_capacity(indent.len() + content);
            rendered.push_str(indent);
            for tok in &current {
                rendered.push_str(&tok.raw);
            }
            lines.push(rendered);
        }
    }

    tracing::trace!(produced = lines.len(), width, "wrapped line");
    lines
}

/// A token wider than a whole line.
///
/// With breaking on, move the largest prefix that fits the remaining
/// capacity onto the current line and leave the rest queued. With breaking
/// off, an oversized token goes alone onto an empty line — overlong, by
/// design — and a non-empty line is emitted first.
fn handle_long_token<R: SequenceRecognizer, W: CellWidth>(
    scanner: &Scanner<R, W>,
    queue: &mut VecDeque<Token>,
    current: &mut Vec<Token>,
    current_width: i64,
    budget: i64,
    break_long_words: bool,
) {
    let space_left = if budget < 1 { 1 } else { budget - current_width };

    if break_long_words {
        let Some(front) = queue.front_mut() else {
            return;
        };
        let units = token_units(scanner, front);
        let mut cut = split_point(&units, space_left as usize);
        if cut == 0 {
            if !current.is_empty() {
                // Nothing fits next to the existing content; emit and retry
                // against a fresh line.
                return;
            }
            // Not even one unit fits an empty line (a double-width char
            // against a one-cell budget). Take one anyway: termination
            // over a faithful stall.
            tracing::debug!(space_left, "forcing a one-unit cut");
            cut = forced_split_point(&units);
        }
        if cut == 0 {
            queue.pop_front();
            return;
        }
        let (head, tail) = split_token(front, &units, cut);
        current.push(head);
        match tail {
            Some(rest) => *front = rest,
            None => {
                queue.pop_front();
            }
        }
    } else if current.is_empty() {
        if let Some(tok) = queue.pop_front() {
            current.push(tok);
        }
    }
}

/// Atomic units of a token, as `(end_byte, cell_width)` pairs: one whole
/// attached sequence, or one printable codepoint. Cuts happen only at unit
/// boundaries, so a sequence can never be torn.
fn token_units<R: SequenceRecognizer, W: CellWidth>(
    scanner: &Scanner<R, W>,
    token: &Token,
) -> Vec<(usize, usize)> {
    let mut units = Vec::new();
    let mut spans = token.spans.iter().peekable();
    let mut pos = 0;
    while pos < token.raw.len() {
        if let Some(span) = spans.peek()
            && span.start == pos
        {
            units.push((span.end, 0));
            pos = span.end;
            spans.next();
            continue;
        }
        let Some(ch) = token.raw[pos..].chars().next() else {
            break;
        };
        pos += ch.len_utf8();
        units.push((pos, scanner.char_width(ch)));
    }
    units
}

/// Largest prefix cut whose visible width fits `space_left`.
///
/// Zero-width units — sequences, combining marks — ride with the cut: the
/// prefix extends past them for free, which keeps a mark attached to the
/// character it modifies and a closing style code attached to the text it
/// closes.
fn split_point(units: &[(usize, usize)], space_left: usize) -> usize {
    let mut cut = 0;
    let mut used = 0;
    for &(end, width) in units {
        if used + width > space_left {
            break;
        }
        used += width;
        cut = end;
    }
    cut
}

/// Forced cut: the first printable unit plus any zero-width units after it.
fn forced_split_point(units: &[(usize, usize)]) -> usize {
    let mut cut = 0;
    let mut took_printable = false;
    for &(end, width) in units {
        if width > 0 {
            if took_printable {
                break;
            }
            took_printable = true;
        }
        cut = end;
    }
    cut
}

/// Split a token at a unit boundary. Spans are units, so each lands wholly
/// in the head or wholly in the tail.
fn split_token(token: &Token, units: &[(usize, usize)], cut: usize) -> (Token, Option<Token>) {
    let head_width: usize = units
        .iter()
        .take_while(|(end, _)| *end <= cut)
        .map(|(_, width)| width)
        .sum();

    let head = Token {
        raw: token.raw[..cut].to_string(),
        width: head_width,
        is_whitespace: token.is_whitespace,
        spans: token
            .spans
            .iter()
            .filter(|span| span.end <= cut)
            .copied()
            .collect(),
    };

    if cut >= token.raw.len() {
        return (head, None);
    }

    let tail = Token {
        raw: token.raw[cut..].to_string(),
        width: token.width - head_width,
        is_whitespace: token.is_whitespace,
        spans: token
            .spans
            .iter()
            .filter(|span| span.start >= cut)
            .map(|span| ControlSpan {
                start: span.start - cut,
                end: span.end - cut,
            })
            .collect(),
    };
    (head, Some(tail))
}
