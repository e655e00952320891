//! The DMS grammar as a small state machine over the [`Scanner`] tokens.
//!
//! ```text
//! [sign] degree [°] [minute ′ [second ″]] [hemisphere]
//! ```
//!
//! A decimal degree forecloses the minutes and seconds,
//! a decimal minute forecloses the seconds.

use std::{convert::TryFrom, fmt, str::FromStr};

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    angle::{
        consts::{ARC_MINUTE_SIGN, ARC_SECOND_SIGN, DEGREE_SIGN, DEGREES_LIMIT},
        ValueError,
    },
    coord::{Hemisphere, Sign},
    scan::{Scanner, Token, TokenType},
};

pub use self::errors::{SyntaxError, SyntaxErrorKind};

mod errors;

/// The raw result of parsing: the numbers are kept as the source text
/// to postpone any rounding.
///
/// Minutes and seconds are only meaningful when the degrees are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParsedFields {
    /// Explicit `+` or `-` in front of the angle
    pub sign: Option<Sign>,
    /// Degrees text, integer or decimal
    pub degrees: Option<String>,
    /// Arc minutes text, integer or decimal
    pub minutes: Option<String>,
    /// Arc seconds text, integer or decimal
    pub seconds: Option<String>,
    /// Trailing `N`, `S`, `E` or `W`
    pub hemisphere: Option<Hemisphere>,
}

impl ParsedFields {
    /// Construct the fields from the raw parts, the empty strings mean 'absent'.
    ///
    /// # Errors
    /// The hemisphere is not one of the `N`, `S`, `E`, `W` letters.
    pub fn from_parts(deg: &str, min: &str, sec: &str, hemi: &str) -> Result<Self, ValueError> {
        let hemisphere = if hemi.is_empty() {
            None
        } else {
            let mut chars = hemi.chars();
            let letter = chars
                .next()
                .filter(|_| chars.next().is_none())
                .and_then(|c| Hemisphere::try_from(c).ok())
                .ok_or_else(|| ValueError::InvalidHemisphere(hemi.to_string()))?;
            Some(letter)
        };

        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Ok(Self {
            sign: None,
            degrees: non_empty(deg),
            minutes: non_empty(min),
            seconds: non_empty(sec),
            hemisphere,
        })
    }
}

impl ParsedFields {
    /// The sign of the whole angle agreed between the explicit sign,
    /// the degrees literal and the hemisphere letter
    pub(crate) fn resolve_sign(&self, deg_text: &str, deg_is_negative: bool) -> Result<Sign, ValueError> {
        let sign = match (self.sign, deg_is_negative) {
            (Some(Sign::Plus), true) => {
                return Err(ValueError::SignedDegrees(Sign::Plus, deg_text.to_string()))
            }
            (_, true) => Some(Sign::Minus),
            (sign, false) => sign,
        };

        match (sign, self.hemisphere) {
            (Some(sign), Some(hemi)) if sign != hemi.sign() => {
                Err(ValueError::HemisphereMismatch(sign, hemi))
            }
            (Some(sign), _) => Ok(sign),
            (None, Some(hemi)) => Ok(hemi.sign()),
            (None, None) => Ok(Sign::Plus),
        }
    }
}

impl fmt::Display for ParsedFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sign) = self.sign {
            write!(f, "{sign}")?;
        }
        write!(f, "{}{DEGREE_SIGN}", self.degrees.as_deref().unwrap_or("0"))?;
        if let Some(min) = &self.minutes {
            write!(f, " {min}{ARC_MINUTE_SIGN}")?;
        }
        if let Some(sec) = &self.seconds {
            write!(f, " {sec}{ARC_SECOND_SIGN}")?;
        }
        if let Some(hemi) = self.hemisphere {
            write!(f, " {hemi}")?;
        }
        Ok(())
    }
}

impl FromStr for ParsedFields {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::new().parse(s)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Sign,
    DegreeValue,
    DegreeSymbol,
    DecimalDegreeSymbol,
    MinuteValue,
    SecondValue,
    Hemisphere,
    Done,
}

impl State {
    /// Consume the tokens allowed in the state and choose the next state
    fn step(self, r: &mut Scanner<'_>, fields: &mut ParsedFields) -> Result<Self, SyntaxError> {
        match self {
            Self::Sign => Ok(parse_sign(r, fields)),
            Self::DegreeValue => parse_deg_value(r, fields),
            Self::DegreeSymbol => Ok(parse_deg_symbol(r, Self::MinuteValue)),
            Self::DecimalDegreeSymbol => Ok(parse_deg_symbol(r, Self::Hemisphere)),
            Self::MinuteValue => parse_min_value(r, fields),
            Self::SecondValue => parse_sec_value(r, fields),
            Self::Hemisphere => Ok(parse_hemisphere(r, fields)),
            Self::Done => Ok(Self::Done),
        }
    }
}

fn parse_sign(r: &mut Scanner<'_>, fields: &mut ParsedFields) -> State {
    if let TokenType::Sign(sign) = r.current().kind {
        fields.sign = Some(sign);
        let _ = r.advance();
    }
    State::DegreeValue
}

fn parse_deg_value(r: &mut Scanner<'_>, fields: &mut ParsedFields) -> Result<State, SyntaxError> {
    let tok = r.current();
    let next = match tok.kind {
        TokenType::Int => {
            let _: i64 = tok
                .literal
                .parse()
                .map_err(|_| SyntaxError::at(tok, SyntaxErrorKind::InvalidDegree))?;
            State::DegreeSymbol
        }
        TokenType::Real => {
            let _ = parse_finite(&tok.literal)
                .filter(|deg| *deg < DEGREES_LIMIT)
                .ok_or_else(|| SyntaxError::at(tok, SyntaxErrorKind::InvalidDegree))?;
            State::DecimalDegreeSymbol
        }
        _ => return Err(SyntaxError::at(tok, SyntaxErrorKind::ExpectedDegree)),
    };

    fields.degrees = Some(tok.literal.clone());
    let _ = r.advance();
    Ok(next)
}

fn parse_deg_symbol(r: &mut Scanner<'_>, next: State) -> State {
    if r.current().kind == TokenType::Degree {
        let _ = r.advance();
    }
    next
}

fn parse_min_value(r: &mut Scanner<'_>, fields: &mut ParsedFields) -> Result<State, SyntaxError> {
    let tok = r.current();
    let next = match tok.kind {
        TokenType::Int => State::SecondValue,
        TokenType::Real => State::Hemisphere,
        _ => return Ok(State::Hemisphere),
    };

    if !is_sexagesimal(tok) {
        return Err(SyntaxError::at(tok, SyntaxErrorKind::InvalidMinute));
    }
    fields.minutes = Some(tok.literal.clone());

    let tok = r.advance();
    if tok.kind != TokenType::Minute {
        return Err(SyntaxError::at(tok, SyntaxErrorKind::ExpectedMinuteSymbol));
    }
    let _ = r.advance();
    Ok(next)
}

fn parse_sec_value(r: &mut Scanner<'_>, fields: &mut ParsedFields) -> Result<State, SyntaxError> {
    let tok = r.current();
    if !matches!(tok.kind, TokenType::Int | TokenType::Real) {
        return Ok(State::Hemisphere);
    }

    if !is_sexagesimal(tok) {
        return Err(SyntaxError::at(tok, SyntaxErrorKind::InvalidSecond));
    }
    fields.seconds = Some(tok.literal.clone());

    let tok = r.advance();
    if tok.kind != TokenType::Second {
        return Err(SyntaxError::at(tok, SyntaxErrorKind::ExpectedSecondSymbol));
    }
    let _ = r.advance();
    Ok(State::Hemisphere)
}

fn parse_hemisphere(r: &mut Scanner<'_>, fields: &mut ParsedFields) -> State {
    if let TokenType::Hemisphere(hemi) = r.current().kind {
        fields.hemisphere = Some(hemi);
        let _ = r.advance();
    }
    State::Done
}

fn parse_finite(literal: &str) -> Option<f64> {
    literal.parse::<f64>().ok().filter(|x| x.is_finite())
}

/// Minutes and seconds should be in the range `[0, 60)`
fn is_sexagesimal(tok: &Token) -> bool {
    let value = match tok.kind {
        TokenType::Int => tok.literal.parse::<i64>().ok().map(|x| x as f64),
        _ => parse_finite(&tok.literal),
    };
    value.map_or(false, |x| (0.0..60.0).contains(&x))
}

/// Parser of the Degree-Minute-Second notation
#[derive(Debug, Default, Copy, Clone)]
pub struct Parser;

impl Parser {
    /// The parser accepting both Unicode (`°′″`) and ASCII (`d*`, `'m`, `"s`) symbols
    pub const fn new() -> Self {
        Self
    }

    /// Validate the text and extract the DMS fields from it.
    ///
    /// # Errors
    /// The first syntax violation found, with its position.
    ///
    /// ```
    /// # use dms::Parser;
    /// let fields = Parser::new().parse("1°2'3\"").unwrap();
    /// assert_eq!(fields.degrees.as_deref(), Some("1"));
    /// assert_eq!(fields.minutes.as_deref(), Some("2"));
    /// assert_eq!(fields.seconds.as_deref(), Some("3"));
    ///
    /// let err = Parser::new().parse("1°60\"").unwrap_err();
    /// assert_eq!(err.to_string(), "1:3: invalid minute \"60\"");
    /// ```
    pub fn parse(&self, text: &str) -> Result<ParsedFields, SyntaxError> {
        let mut fields = ParsedFields::default();
        let mut r = Scanner::new(text);
        let first = r.current().pos;

        let mut state = State::Sign;
        while state != State::Done {
            let next = state.step(&mut r, &mut fields).map_err(|err| {
                debug!("Cannot parse {text:?}: {err}");
                err
            })?;
            trace!("{state:?} -> {next:?}");
            state = next;
        }

        if let (Some(sign), Some(hemi)) = (fields.sign, fields.hemisphere) {
            let err = SyntaxError::new(first, SyntaxErrorKind::SignAndHemisphere(sign, hemi));
            debug!("Cannot parse {text:?}: {err}");
            return Err(err);
        }

        let tok = r.current();
        if !tok.is_end_of_text() {
            let err = SyntaxError::at(tok, SyntaxErrorKind::Unexpected);
            debug!("Cannot parse {text:?}: {err}");
            return Err(err);
        }

        Ok(fields)
    }
}
