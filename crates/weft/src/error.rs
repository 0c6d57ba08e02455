#![forbid(unsafe_code)]

//! Error model and width-argument validation.
//!
//! The engine has exactly one failure mode: a non-positive width, rejected
//! before any wrapping work begins. Malformed or sequence-lookalike text is
//! never an error — it is either recognized by the injected capability or
//! treated as printable.

use std::fmt;

/// Errors produced by the wrapping entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrapError {
    /// The requested width was zero or negative.
    ///
    /// Carries the offending value and the Rust type it arrived as; both
    /// appear in the message, value first, so callers that match on the
    /// rendered text see `invalid width -3(<i32>) (must be integer > 0)`.
    InvalidWidth {
        /// The offending value, as given.
        value: i128,
        /// Type name of the width argument.
        ty: &'static str,
    },
}

impl fmt::Display for WrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidth { value, ty } => {
                write!(f, "invalid width {value}(<{ty}>) (must be integer > 0)")
            }
        }
    }
}

impl std::error::Error for WrapError {}

/// Integer width argument.
///
/// Implemented for the primitive integer types so [`wrap`](crate::wrap)
/// accepts whichever width type the caller has on hand, while a rejected
/// value still reports the type it was observed as.
pub trait WidthArg: Copy {
    /// Validate as a positive line budget in cells.
    ///
    /// # Errors
    /// [`WrapError::InvalidWidth`] when the value is zero or negative.
    fn into_width(self) -> Result<usize, WrapError>;
}

macro_rules! width_arg_impl {
    ($($ty:ty),* $(,)?) => {
        $(
            impl WidthArg for $ty {
                fn into_width(self) -> Result<usize, WrapError> {
                    if self > 0 {
                        Ok(self as usize)
                    } else {
                        Err(WrapError::InvalidWidth {
                            value: self as i128,
                            ty: stringify!($ty),
                        })
                    }
                }
            }
        )*
    };
}

width_arg_impl!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
