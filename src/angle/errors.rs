use std::{error::Error, fmt};

use crate::{
    coord::{Axis, Hemisphere, Sign},
    enum_trivial_from_impl,
    parser::SyntaxError,
};

/// The parsed fields cannot form an angle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The degrees are not a finite number or too big to be written as an integer
    InvalidDegrees(String),
    /// Not a number in `[0..60)`
    InvalidMinutes(String),
    /// Not a number in `[0..60)`
    InvalidSeconds(String),
    /// Not one of `N`, `S`, `E`, `W`
    InvalidHemisphere(String),
    /// Minutes or seconds without degrees
    MissingDegrees,
    /// `1.5°30′`
    DecimalDegreesWithMinutes(String),
    /// `1°30.5′20″`
    DecimalMinutesWithSeconds(String),
    /// `+-1`
    SignedDegrees(Sign, String),
    /// `-1°N`
    HemisphereMismatch(Sign, Hemisphere),
    /// The angle is tagged with one axis but used as the other
    AxisMismatch {
        /// The axis asked by the caller
        expected: Axis,
        /// The axis the angle is tagged with by its hemisphere letter
        found: Axis,
    },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDegrees(lit) => write!(f, "invalid degrees: {lit:?}"),
            Self::InvalidMinutes(lit) => write!(f, "invalid minutes: {lit:?}"),
            Self::InvalidSeconds(lit) => write!(f, "invalid seconds: {lit:?}"),
            Self::InvalidHemisphere(lit) => write!(f, "invalid hemisphere: {lit:?}"),
            Self::MissingDegrees => write!(f, "minutes or seconds given without degrees"),
            Self::DecimalDegreesWithMinutes(lit) => {
                write!(f, "decimal degrees {lit:?} cannot be followed by minutes or seconds")
            }
            Self::DecimalMinutesWithSeconds(lit) => {
                write!(f, "decimal minutes {lit:?} cannot be followed by seconds")
            }
            Self::SignedDegrees(sign, lit) => {
                write!(f, "sign is '{sign}' but degrees are negative: {lit}")
            }
            Self::HemisphereMismatch(sign, hemi) => {
                write!(f, "hemisphere mismatch: '{sign}' and '{hemi}'")
            }
            Self::AxisMismatch { expected, found } => {
                write!(f, "the angle is a {found}, cannot use it as a {expected}")
            }
        }
    }
}

impl Error for ValueError {}

/// Parsing the angle from a text failed on either of the two stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAngleError {
    /// The text does not follow the DMS grammar
    Syntax(SyntaxError),
    /// The fields are well-formed but do not make an angle
    Value(ValueError),
}

enum_trivial_from_impl!(SyntaxError => ParseAngleError:Syntax);
enum_trivial_from_impl!(ValueError => ParseAngleError:Value);

impl fmt::Display for ParseAngleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot parse angle: ")?;
        match self {
            Self::Syntax(inner) => write!(f, "{inner}"),
            Self::Value(inner) => write!(f, "{inner}"),
        }
    }
}

impl Error for ParseAngleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Syntax(inner) => Some(inner),
            Self::Value(inner) => Some(inner),
        }
    }
}
