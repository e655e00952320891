//! Rendering the angles back into the DMS text

use std::{convert::TryFrom, error::Error, fmt};

use rust_decimal::{Decimal, RoundingStrategy};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    angle::{
        consts::{
            ARC_MINUTE_SIGN, ARC_SECOND_SIGN, DEGREE_SIGN, MINUTES_IN_DEGREE, SECONDS_IN_DEGREE,
            SECONDS_IN_MINUTE,
        },
        Angle, ValueError,
    },
    coord::{Axis, Hemisphere, Sign},
    enum_trivial_from_impl,
    parser::ParsedFields,
};

/// The smallest unit written as a separate field.
/// The smaller units are folded into its fractional part.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Unit {
    /// `1.0525°`
    Degree,
    /// `1° 3.15′`
    Minute,
    /// `1° 3′ 9″`
    Second,
}

impl Default for Unit {
    fn default() -> Self {
        Self::Second
    }
}

/// The angle cannot be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Some of the components are infinite or NaN
    NotFinite,
    /// The raw field is not a decimal number
    NotANumber(String),
    /// The degrees are too big for the decimal arithmetic
    OutOfRange(String),
    /// The angle does not agree with the requested axis
    Value(ValueError),
}

enum_trivial_from_impl!(ValueError => FormatError:Value);

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot format angle: ")?;
        match self {
            Self::NotFinite => write!(f, "the components should be finite numbers"),
            Self::NotANumber(lit) => write!(f, "{lit:?} is not a decimal number"),
            Self::OutOfRange(lit) => write!(f, "the degrees {lit:?} are too big"),
            Self::Value(inner) => write!(f, "{inner}"),
        }
    }
}

impl Error for FormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFinite | Self::NotANumber(_) | Self::OutOfRange(_) => None,
            Self::Value(inner) => Some(inner),
        }
    }
}

/// How to write an angle: the symbols, the separator between the fields,
/// the smallest unit and the rounding of the last field.
///
/// ```
/// # use dms::{Angle, FormatConfig, Unit};
/// let config = FormatConfig::new(Unit::Second, Some(1));
/// let angle = Angle::new(1.0, 2.0, 3.33);
/// assert_eq!(config.format(&angle, None).unwrap(), "1° 2′ 3.3″");
/// assert_eq!(config.format_lat(&-angle).unwrap(), "1° 2′ 3.3″ S");
///
/// let compact = config.with_symbols("d", "m", "").with_separator("");
/// assert_eq!(compact.format(&angle, None).unwrap(), "1d2m3.3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormatConfig {
    degree_symbol: String,
    minute_symbol: String,
    second_symbol: String,
    separator: String,
    unit: Unit,
    places: Option<usize>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::new(Unit::default(), None)
    }
}

impl FormatConfig {
    /// The Unicode symbols `°′″` separated by a single space.
    ///
    /// The last field is rounded to the given number of decimal places
    /// or written in the shortest form with `None`.
    pub fn new(unit: Unit, places: Option<usize>) -> Self {
        Self {
            degree_symbol: DEGREE_SIGN.to_string(),
            minute_symbol: ARC_MINUTE_SIGN.to_string(),
            second_symbol: ARC_SECOND_SIGN.to_string(),
            separator: " ".to_string(),
            unit,
            places,
        }
    }

    /// Replace the degree, minute and second symbols
    pub fn with_symbols(self, deg: &str, min: &str, sec: &str) -> Self {
        Self {
            degree_symbol: deg.to_string(),
            minute_symbol: min.to_string(),
            second_symbol: sec.to_string(),
            ..self
        }
    }

    /// Replace the string put between the fields and before the hemisphere letter
    pub fn with_separator(self, separator: &str) -> Self {
        Self {
            separator: separator.to_string(),
            ..self
        }
    }

    /// The smallest unit written
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// The rounding of the last field
    pub const fn places(&self) -> Option<usize> {
        self.places
    }

    /// Write the angle with a leading minus (no axis)
    /// or with the hemisphere letter of the axis.
    ///
    /// # Errors
    /// - the angle has non-finite components;
    /// - the angle was parsed for the other axis.
    pub fn format(&self, angle: &Angle, axis: Option<Axis>) -> Result<String, FormatError> {
        let (deg, min, sec) = angle.dms();
        if !(deg.is_finite() && min.is_finite() && sec.is_finite()) {
            return Err(FormatError::NotFinite);
        }
        if let Some(axis) = axis {
            angle.check_axis(axis)?;
        }
        Ok(self.render(*angle, axis))
    }

    /// Write the angle as a latitude with the `N` or `S` suffix
    ///
    /// # Errors
    /// See [`FormatConfig::format`]
    pub fn format_lat(&self, angle: &Angle) -> Result<String, FormatError> {
        self.format(angle, Some(Axis::Latitude))
    }

    /// Write the angle as a longitude with the `E` or `W` suffix
    ///
    /// # Errors
    /// See [`FormatConfig::format`]
    pub fn format_lon(&self, angle: &Angle) -> Result<String, FormatError> {
        self.format(angle, Some(Axis::Longitude))
    }

    /// Write the raw degree, minute and second magnitudes with the given sign.
    /// The components get normalized the same way [`Angle::with_sign`] does it.
    ///
    /// # Errors
    /// Some of the components are infinite or NaN.
    pub fn format_dms(
        &self,
        sign: Sign,
        deg: f64,
        min: f64,
        sec: f64,
        axis: Option<Axis>,
    ) -> Result<String, FormatError> {
        if !(deg.is_finite() && min.is_finite() && sec.is_finite()) {
            return Err(FormatError::NotFinite);
        }
        self.format(&Angle::with_sign(sign, deg, min, sec), axis)
    }

    /// Infallible rendering, the caller is responsible for the validation
    pub(crate) fn render(&self, angle: Angle, axis: Option<Axis>) -> String {
        let mut deg = angle.whole_degrees();
        let mut min = angle.arc_minutes();
        let sec = angle.arc_seconds();
        let sep = &self.separator;

        let (body, is_zero) = match self.unit {
            Unit::Degree => {
                let value = fixed(
                    deg + min / MINUTES_IN_DEGREE + sec / SECONDS_IN_DEGREE,
                    self.places,
                );
                let is_zero = is_zero_text(&value);
                (format!("{value}{}", self.degree_symbol), is_zero)
            }
            Unit::Minute => {
                let mut value = fixed(min + sec / SECONDS_IN_MINUTE, self.places);
                if is_full_circle(&value, MINUTES_IN_DEGREE) {
                    value = fixed(0.0, self.places);
                    deg += 1.0;
                }
                let is_zero = deg == 0.0 && is_zero_text(&value);
                let body = format!(
                    "{deg}{}{sep}{value}{}",
                    self.degree_symbol, self.minute_symbol
                );
                (body, is_zero)
            }
            Unit::Second => {
                let mut value = fixed(sec, self.places);
                if is_full_circle(&value, SECONDS_IN_MINUTE) {
                    value = fixed(0.0, self.places);
                    min += 1.0;
                    if min >= MINUTES_IN_DEGREE {
                        min = 0.0;
                        deg += 1.0;
                    }
                }
                let is_zero = deg == 0.0 && min == 0.0 && is_zero_text(&value);
                let body = format!(
                    "{deg}{}{sep}{min}{}{sep}{value}{}",
                    self.degree_symbol, self.minute_symbol, self.second_symbol
                );
                (body, is_zero)
            }
        };

        // rounded to zero loses the sign
        let sign = if is_zero { Sign::Plus } else { angle.sign() };
        self.with_direction(body, sign, axis)
    }

    fn with_direction(&self, body: String, sign: Sign, axis: Option<Axis>) -> String {
        match axis {
            Some(axis) => {
                let hemisphere = Hemisphere::with_axis_and_sign(axis, sign);
                format!("{body}{}{hemisphere}", self.separator)
            }
            None if sign.is_negative() => format!("-{body}"),
            None => body,
        }
    }

    /// Write the parsed fields straight from their source text.
    ///
    /// The finer fields are folded into the last written one
    /// which is rounded in the decimal arithmetic (half away from zero),
    /// so no binary floating point rounding is involved.
    /// The rounding never adds the trailing zeros.
    ///
    /// ```
    /// # use dms::{FormatConfig, ParsedFields, Unit};
    /// let fields: ParsedFields = "1°2'3.25\"S".parse().unwrap();
    /// let config = FormatConfig::new(Unit::Second, Some(1));
    /// assert_eq!(config.format_fields(&fields, None).unwrap(), "-1° 2′ 3.3″");
    /// assert_eq!(config.format_lat_fields(&fields).unwrap(), "1° 2′ 3.3″ S");
    /// ```
    ///
    /// # Errors
    /// - some field is not a decimal number or a minute/second field is negative;
    /// - the sign and the hemisphere contradict each other;
    /// - the hemisphere belongs to the other axis.
    pub fn format_fields(
        &self,
        fields: &ParsedFields,
        axis: Option<Axis>,
    ) -> Result<String, FormatError> {
        let deg_text = match fields.degrees.as_deref() {
            Some(deg) => deg,
            None if fields.minutes.is_some() || fields.seconds.is_some() => {
                return Err(ValueError::MissingDegrees.into())
            }
            None => "0",
        };

        let deg = decimal(deg_text)?;
        let min = fields
            .minutes
            .as_deref()
            .map(|min| unsigned_decimal(min, ValueError::InvalidMinutes))
            .transpose()?
            .unwrap_or_default();
        let sec = fields
            .seconds
            .as_deref()
            .map(|sec| unsigned_decimal(sec, ValueError::InvalidSeconds))
            .transpose()?
            .unwrap_or_default();

        let sign = fields.resolve_sign(deg_text, deg.is_sign_negative() && !deg.is_zero())?;
        if let (Some(expected), Some(hemi)) = (axis, fields.hemisphere) {
            let found = hemi.axis();
            if found != expected {
                return Err(ValueError::AxisMismatch { expected, found }.into());
            }
        }

        let (body, is_zero) = self
            .render_decimal(deg.abs(), min, sec)
            .ok_or_else(|| FormatError::OutOfRange(deg_text.to_string()))?;
        let sign = if is_zero { Sign::Plus } else { sign };
        Ok(self.with_direction(body, sign, axis))
    }

    /// Write the parsed fields as a latitude with the `N` or `S` suffix
    ///
    /// # Errors
    /// See [`FormatConfig::format_fields`]
    pub fn format_lat_fields(&self, fields: &ParsedFields) -> Result<String, FormatError> {
        self.format_fields(fields, Some(Axis::Latitude))
    }

    /// Write the parsed fields as a longitude with the `E` or `W` suffix
    ///
    /// # Errors
    /// See [`FormatConfig::format_fields`]
    pub fn format_lon_fields(&self, fields: &ParsedFields) -> Result<String, FormatError> {
        self.format_fields(fields, Some(Axis::Longitude))
    }

    /// The body of the text and whether it is zero after the rounding.
    /// `None` on the decimal overflow.
    fn render_decimal(&self, deg: Decimal, min: Decimal, sec: Decimal) -> Option<(String, bool)> {
        let sixty = Decimal::new(60, 0);
        let seconds_in_degree = Decimal::new(3600, 0);
        let sep = &self.separator;
        let round = |value: Decimal| match self.places {
            Some(places) => value.round_dp_with_strategy(
                u32::try_from(places).unwrap_or(u32::MAX),
                RoundingStrategy::MidpointAwayFromZero,
            ),
            None => value,
        };

        let res = match self.unit {
            Unit::Degree => {
                let total = if min.is_zero() && sec.is_zero() {
                    deg
                } else {
                    deg.checked_add(min.checked_div(sixty)?)?
                        .checked_add(sec.checked_div(seconds_in_degree)?)?
                        .normalize()
                };
                let value = round(total);
                (format!("{value}{}", self.degree_symbol), value.is_zero())
            }
            Unit::Minute => {
                let total = deg.checked_mul(sixty)?.checked_add(min)?;
                let total = if sec.is_zero() {
                    total
                } else {
                    total.checked_add(sec.checked_div(sixty)?)?.normalize()
                };
                let value = round(total);
                let whole_deg = (value / sixty).floor();
                let min = value - whole_deg * sixty;
                let body = format!(
                    "{}{}{sep}{min}{}",
                    whole_deg.normalize(),
                    self.degree_symbol,
                    self.minute_symbol
                );
                (body, value.is_zero())
            }
            Unit::Second => {
                let total = deg
                    .checked_mul(seconds_in_degree)?
                    .checked_add(min.checked_mul(sixty)?)?
                    .checked_add(sec)?;
                let value = round(total);
                let whole_deg = (value / seconds_in_degree).floor();
                let rest = value - whole_deg * seconds_in_degree;
                let whole_min = (rest / sixty).floor();
                let sec = rest - whole_min * sixty;
                let body = format!(
                    "{}{}{sep}{}{}{sep}{sec}{}",
                    whole_deg.normalize(),
                    self.degree_symbol,
                    whole_min.normalize(),
                    self.minute_symbol,
                    self.second_symbol
                );
                (body, value.is_zero())
            }
        };
        Some(res)
    }
}

/// The literals like `.5` and `7.` are completed before the exact decimal parsing
fn decimal(literal: &str) -> Result<Decimal, FormatError> {
    let (minus, digits) = literal
        .strip_prefix('-')
        .map_or(("", literal), |digits| ("-", digits));
    if !digits.chars().any(|c| c.is_ascii_digit()) {
        return Err(FormatError::NotANumber(literal.to_string()));
    }

    let lead = if digits.starts_with('.') { "0" } else { "" };
    let trail = if digits.ends_with('.') { "0" } else { "" };
    Decimal::from_str_exact(&format!("{minus}{lead}{digits}{trail}"))
        .map_err(|_| FormatError::NotANumber(literal.to_string()))
}

fn unsigned_decimal(literal: &str, invalid: fn(String) -> ValueError) -> Result<Decimal, FormatError> {
    let value = decimal(literal)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(invalid(literal.to_string()).into());
    }
    Ok(value.abs())
}

fn fixed(value: f64, places: Option<usize>) -> String {
    match places {
        Some(places) => format!("{value:.places$}"),
        None => value.to_string(),
    }
}

fn is_zero_text(text: &str) -> bool {
    text.parse::<f64>().map_or(false, |x| x == 0.0)
}

/// Rounding may turn 59.96 into "60.0"
fn is_full_circle(text: &str, base: f64) -> bool {
    text.parse::<f64>().map_or(false, |x| x >= base)
}


#[cfg(test)]
mod fields_tests {
    use super::*;

    fn fields(s: &str) -> ParsedFields {
        s.parse().unwrap()
    }

    #[test]
    fn seconds_rounded() {
        let config = FormatConfig::new(Unit::Second, Some(1));
        assert_eq!(
            config.format_fields(&fields("1°2'3.33\""), None).unwrap(),
            "1° 2′ 3.3″"
        );
        assert_eq!(
            config.format_fields(&fields("-1°2'3.33\""), None).unwrap(),
            "-1° 2′ 3.3″"
        );
    }

    #[test]
    fn midpoint_away_from_zero() {
        let config = FormatConfig::new(Unit::Second, Some(1));
        assert_eq!(
            config.format_fields(&fields("1°2'3.25\""), None).unwrap(),
            "1° 2′ 3.3″"
        );

        let config = FormatConfig::new(Unit::Degree, Some(2));
        assert_eq!(config.format_fields(&fields("2.675"), None).unwrap(), "2.68°");
    }

    #[test]
    fn no_binary_rounding() {
        let config = FormatConfig::new(Unit::Degree, Some(20));
        assert_eq!(config.format_fields(&fields("0.1"), None).unwrap(), "0.1°");

        let through_float = config.format(&Angle::from(0.1), None).unwrap();
        assert_ne!(through_float, "0.1°");
    }

    #[test]
    fn raw_text_kept_without_rounding() {
        let config = FormatConfig::default();
        assert_eq!(
            config.format_fields(&fields("1°2'3.40\""), None).unwrap(),
            "1° 2′ 3.40″"
        );
        assert_eq!(
            config.format_fields(&fields("28*05'33\""), None).unwrap(),
            "28° 5′ 33″"
        );
    }

    #[test]
    fn finer_fields_folded() {
        let config = FormatConfig::new(Unit::Degree, Some(6));
        assert_eq!(
            config.format_fields(&fields("1°3'9\""), None).unwrap(),
            "1.0525°"
        );

        let config = FormatConfig::new(Unit::Minute, None);
        assert_eq!(
            config.format_fields(&fields("1°2'30\""), None).unwrap(),
            "1° 2.5′"
        );
    }

    #[test]
    fn rounding_carries() {
        let config = FormatConfig::new(Unit::Minute, Some(1));
        assert_eq!(
            config.format_fields(&fields("1°59'59.99\""), None).unwrap(),
            "2° 0.0′"
        );

        let config = FormatConfig::new(Unit::Second, Some(1));
        assert_eq!(
            config.format_fields(&fields("1°59'59.99\""), None).unwrap(),
            "2° 0′ 0.0″"
        );
    }

    #[test]
    fn hemisphere() {
        let config = FormatConfig::default();
        let south = fields("1°2'3\"S");
        assert_eq!(config.format_fields(&south, None).unwrap(), "-1° 2′ 3″");
        assert_eq!(config.format_lat_fields(&south).unwrap(), "1° 2′ 3″ S");

        let east = fields("12.582439°E");
        assert_eq!(
            FormatConfig::new(Unit::Degree, None)
                .with_separator("")
                .format_lon_fields(&east)
                .unwrap(),
            "12.582439°E"
        );
    }

    #[test]
    fn sign_to_hemisphere() {
        let config = FormatConfig::default();
        assert_eq!(
            config.format_lon_fields(&fields("-1°2'")).unwrap(),
            "1° 2′ 0″ W"
        );
    }

    #[test]
    fn rounded_to_zero_is_positive() {
        let config = FormatConfig::new(Unit::Second, Some(1));
        assert_eq!(
            config.format_fields(&fields("-0°0'0.04\""), None).unwrap(),
            "0° 0′ 0.0″"
        );
    }

    #[test]
    fn wrong_axis() {
        let err = FormatConfig::default()
            .format_lon_fields(&fields("1°S"))
            .unwrap_err();
        assert_eq!(
            err,
            FormatError::Value(ValueError::AxisMismatch {
                expected: Axis::Longitude,
                found: Axis::Latitude
            })
        );
    }

    #[test]
    fn not_a_number() {
        let bad = ParsedFields::from_parts("1", "x", "", "").unwrap();
        let err = FormatConfig::default().format_fields(&bad, None).unwrap_err();
        assert_eq!(err, FormatError::NotANumber("x".into()));
        assert_eq!(
            err.to_string(),
            "Cannot format angle: \"x\" is not a decimal number"
        );
    }

    #[test]
    #[should_panic(expected = "MissingDegrees")]
    fn minutes_without_degrees() {
        let bad = ParsedFields::from_parts("", "30", "", "").unwrap();
        let _ = FormatConfig::default().format_fields(&bad, None).unwrap();
    }

    #[test]
    fn negative_minutes() {
        let bad = ParsedFields::from_parts("1", "-30", "", "").unwrap();
        assert_eq!(
            FormatConfig::default().format_fields(&bad, None),
            Err(FormatError::Value(ValueError::InvalidMinutes("-30".into())))
        );
    }

    #[test]
    fn too_big_for_decimal() {
        let huge = ParsedFields::from_parts("70000000000000000000000000000", "", "", "").unwrap();
        assert_eq!(
            FormatConfig::default().format_fields(&huge, None),
            Err(FormatError::OutOfRange("70000000000000000000000000000".into()))
        );
    }
}
