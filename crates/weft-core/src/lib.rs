#![forbid(unsafe_code)]

//! Capability layer: cell widths and control-sequence recognition.
//!
//! # Role in Weft
//! `weft-core` is the leaf crate. It answers the two questions the wrapping
//! engine cannot answer on its own:
//!
//! - **How many cells does this codepoint occupy on screen?** ([`CellWidth`],
//!   with [`WidthPolicy`] as the stock answer backed by Unicode width data.)
//! - **Does a control sequence start here, and how long is it?**
//!   ([`SequenceRecognizer`], with [`AnsiRecognizer`] as the stock answer for
//!   the common ANSI/VT grammar.)
//!
//! Both are trait seams rather than hardcoded tables: what counts as a
//! sequence is terminal-kind dependent, and width data varies by Unicode
//! revision and locale convention. The engine in the `weft` crate is generic
//! over both, so tests run against fakes and callers can substitute their
//! own terminal database.

pub mod recognize;
pub mod width;

pub use recognize::{AnsiRecognizer, NullRecognizer, SequenceRecognizer};
pub use width::{CellWidth, WidthPolicy};
