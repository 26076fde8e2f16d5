//! Byte classification.
//!
//! The grammar never looks at raw bytes directly: each byte is first mapped to
//! one of a handful of coarse [`Input`] classes and the transition table is
//! keyed on the class. Multi-byte UTF-8 sequences are not decoded, so every
//! byte of a non-ASCII character classifies as [`Input::Other`].

use core::fmt;

/// The coarse category of a single input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    /// Space, carriage return, line feed or horizontal tab.
    Whitespace,
    /// `{`
    ObjectOpen,
    /// `}`
    ObjectClose,
    /// `"`
    Quote,
    /// `[`
    ArrayOpen,
    /// `]`
    ArrayClose,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// ASCII `0` through `9`.
    Digit,
    /// Any byte not covered by another class.
    Other,
}

impl Input {
    /// Every class, in declaration order.
    pub const ALL: [Input; 11] = [
        Input::Whitespace,
        Input::ObjectOpen,
        Input::ObjectClose,
        Input::Quote,
        Input::ArrayOpen,
        Input::ArrayClose,
        Input::Colon,
        Input::Comma,
        Input::Dot,
        Input::Digit,
        Input::Other,
    ];

    /// Whether a byte of this class is taken literally into a key or string
    /// buffer. Only the quote (which terminates) and whitespace are excluded.
    #[must_use]
    #[inline]
    pub const fn is_literal(self) -> bool {
        !matches!(self, Input::Quote | Input::Whitespace)
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Input::Whitespace => "whitespace",
            Input::ObjectOpen => "'{'",
            Input::ObjectClose => "'}'",
            Input::Quote => "'\"'",
            Input::ArrayOpen => "'['",
            Input::ArrayClose => "']'",
            Input::Colon => "':'",
            Input::Comma => "','",
            Input::Dot => "'.'",
            Input::Digit => "digit",
            Input::Other => "character",
        };
        f.write_str(name)
    }
}

/// Classifies one byte. Pure: the result depends on `byte` alone.
#[must_use]
#[inline]
pub const fn classify(byte: u8) -> Input {
    match byte {
        b' ' | b'\r' | b'\n' | b'\t' => Input::Whitespace,
        b'{' => Input::ObjectOpen,
        b'}' => Input::ObjectClose,
        b'"' => Input::Quote,
        b'[' => Input::ArrayOpen,
        b']' => Input::ArrayClose,
        b':' => Input::Colon,
        b',' => Input::Comma,
        b'.' => Input::Dot,
        b'0'..=b'9' => Input::Digit,
        _ => Input::Other,
    }
}
