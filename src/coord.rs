//! Markers qualifying the direction of an angle: the leading sign
//! and the hemisphere letter of a latitude or longitude.

use std::{convert::TryFrom, error::Error, fmt, ops::Neg};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[doc(hidden)]
#[macro_export]
/// Implements simple two variants enum associated with the boolean type
macro_rules! bool_enum {
    ($(#[$meta:meta])* $name:ident: $truthy:ident and $falsy:ident; parse from $true_ch:literal:$false_ch:literal with $parse_err:ident) => {
        use self::$name::{$falsy, $truthy};

        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum $name {
            #[allow(missing_docs)]
            $truthy,
            #[allow(missing_docs)]
            $falsy,
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self::Output {
                match self {
                    $falsy => $truthy,
                    $truthy => $falsy,
                }
            }
        }

        impl From<bool> for $name {
            fn from(val: bool) -> Self {
                if val {
                    $truthy
                } else {
                    $falsy
                }
            }
        }

        #[derive(Debug, Clone, PartialEq, Eq)]
        /// The character does not represent the marker
        pub struct $parse_err {
            failed: String,
        }

        impl fmt::Display for $parse_err {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "Cannot parse {} from {:?}",
                    stringify!($name),
                    self.failed
                )
            }
        }

        impl Error for $parse_err {}

        impl TryFrom<char> for $name {
            type Error = $parse_err;

            fn try_from(c: char) -> Result<Self, Self::Error> {
                match c {
                    $true_ch => Ok($truthy),
                    $false_ch => Ok($falsy),
                    _ => Err($parse_err {
                        failed: c.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let symbol = match self {
                    $truthy => $true_ch,
                    $falsy => $false_ch,
                };
                write!(f, "{}", symbol)
            }
        }
    };
}

bool_enum!(
    /// Explicit sign written in front of an angle
    Sign: Plus and Minus; parse from '+':'-' with ParseSignError
);

bool_enum!(
    /// Hemisphere of a latitude
    Pole: North and South; parse from 'N':'S' with ParsePoleError
);

bool_enum!(
    /// Hemisphere of a longitude
    RotationalDirection: East and West; parse from 'E':'W' with ParseDirectionError
);

impl Sign {
    /// Is it the minus sign
    pub fn is_negative(self) -> bool {
        self == Minus
    }

    /// The numeric multiplier `1.0` or `-1.0`
    pub fn signum(self) -> f64 {
        match self {
            Plus => 1.0,
            Minus => -1.0,
        }
    }
}

impl Default for Sign {
    fn default() -> Self {
        Plus
    }
}

/// Whether the angle is interpreted as a latitude or as a longitude
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// North-south, hemispheres `N` and `S`
    Latitude,
    /// East-west, hemispheres `E` and `W`
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        };
        write!(f, "{name}")
    }
}

/// One of the `N`, `S`, `E`, `W` letters disambiguating the sign of an angle
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Hemisphere {
    /// `N` or `S`
    Lat(Pole),
    /// `E` or `W`
    Lon(RotationalDirection),
}

impl Hemisphere {
    /// The hemisphere of the given axis lying on the side of the sign
    pub fn with_axis_and_sign(axis: Axis, sign: Sign) -> Self {
        let is_positive = !sign.is_negative();
        match axis {
            Axis::Latitude => Self::Lat(is_positive.into()),
            Axis::Longitude => Self::Lon(is_positive.into()),
        }
    }

    /// Which axis the letter belongs to
    pub fn axis(self) -> Axis {
        match self {
            Self::Lat(_) => Axis::Latitude,
            Self::Lon(_) => Axis::Longitude,
        }
    }

    /// `S` and `W` stand for negative angles
    pub fn sign(self) -> Sign {
        match self {
            Self::Lat(South) | Self::Lon(West) => Minus,
            Self::Lat(North) | Self::Lon(East) => Plus,
        }
    }
}

impl From<Pole> for Hemisphere {
    fn from(pole: Pole) -> Self {
        Self::Lat(pole)
    }
}

impl From<RotationalDirection> for Hemisphere {
    fn from(direction: RotationalDirection) -> Self {
        Self::Lon(direction)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The character is not a hemisphere letter
pub struct ParseHemisphereError {
    failed: String,
}

impl fmt::Display for ParseHemisphereError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot parse Hemisphere from {:?}", self.failed)
    }
}

impl Error for ParseHemisphereError {}

impl TryFrom<char> for Hemisphere {
    type Error = ParseHemisphereError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Pole::try_from(c)
            .map(Self::Lat)
            .or_else(|_| RotationalDirection::try_from(c).map(Self::Lon))
            .map_err(|_| ParseHemisphereError {
                failed: c.to_string(),
            })
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lat(pole) => write!(f, "{pole}"),
            Self::Lon(direction) => write!(f, "{direction}"),
        }
    }
}
