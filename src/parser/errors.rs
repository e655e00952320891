use std::{error::Error, fmt};

use crate::{
    coord::{Hemisphere, Sign},
    scan::{Pos, Token},
};

/// What went wrong while parsing.
/// Every variant holds the offending literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// No number at the degree place
    ExpectedDegree(String),
    /// The number overflows or the whole degrees do not fit into `i64`
    InvalidDegree(String),
    /// `min >= 60`
    InvalidMinute(String),
    /// `sec >= 60`
    InvalidSecond(String),
    /// A number without the arcminute sign
    ExpectedMinuteSymbol(String),
    /// A number without the arcsecond sign
    ExpectedSecondSymbol(String),
    /// Trailing garbage
    Unexpected(String),
    /// Both the leading sign and the hemisphere letter
    SignAndHemisphere(Sign, Hemisphere),
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedDegree(lit) => write!(f, "expected degree, got {lit:?}"),
            Self::InvalidDegree(lit) => write!(f, "invalid degree {lit:?}"),
            Self::InvalidMinute(lit) => write!(f, "invalid minute {lit:?}"),
            Self::InvalidSecond(lit) => write!(f, "invalid second {lit:?}"),
            Self::ExpectedMinuteSymbol(lit) => write!(f, "expected minute symbol, got {lit:?}"),
            Self::ExpectedSecondSymbol(lit) => write!(f, "expected second symbol, got {lit:?}"),
            Self::Unexpected(lit) => write!(f, "unexpected {lit:?}"),
            Self::SignAndHemisphere(sign, hemi) => {
                write!(f, "only one of \"{sign}\" or \"{hemi}\" allowed")
            }
        }
    }
}

/// Malformed DMS text, positioned at the offending token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pos: Pos,
    kind: SyntaxErrorKind,
}

impl SyntaxError {
    pub(crate) fn at(token: &Token, make_kind: fn(String) -> SyntaxErrorKind) -> Self {
        Self {
            pos: token.pos,
            kind: make_kind(token.literal.clone()),
        }
    }

    pub(crate) const fn new(pos: Pos, kind: SyntaxErrorKind) -> Self {
        Self { pos, kind }
    }

    /// Where the error happened
    pub const fn pos(&self) -> Pos {
        self.pos
    }

    /// The reason of the error
    pub const fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.kind)
    }
}

impl Error for SyntaxError {}
