//! The angle stored as a sign and three sexagesimal magnitudes.
//!
//! After any construction or operation the angle is normalized:
//!  - the degrees are whole;
//!  - the arc minutes are whole and lie in the range `[0, 60)`;
//!  - the arc seconds lie in the range `[0, 60)`.
//!
//! The fractions of the larger units flow down to the smaller ones
//! and the overflow of the smaller units is carried up.
//! All the arithmetic is done with `f64` and the bounds are compared strictly,
//! so values extremely close to 60 may or may not carry.

use std::{
    convert::TryFrom,
    fmt,
    iter::Sum,
    ops::{Add, Neg, Sub},
    str::FromStr,
};

use log::debug;
use num_traits::Zero;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    coord::{Axis, Hemisphere, Sign},
    format::{FormatConfig, Unit},
    parser::{ParsedFields, Parser},
    utils::{carry, unsigned_zero, ToUnsigned},
};

use self::consts::{DEGREES_LIMIT, MINUTES_IN_DEGREE, SECONDS_IN_DEGREE, SECONDS_IN_MINUTE};
pub use self::errors::{ParseAngleError, ValueError};

pub(crate) mod consts;
mod errors;

/// Degree-minute-second angle with a single sign for the whole value.
///
/// The angle may remember the [`Axis`] it was parsed for
/// (when the text had a hemisphere letter).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Angle {
    sign: Sign,
    deg: f64,
    min: f64,
    sec: f64,
    axis: Option<Axis>,
}

/// Bring the signed components into the canonical form
/// where all the parts are non-negative and the sign is extracted
fn normalize(deg: f64, min: f64, sec: f64) -> (Sign, [f64; 3]) {
    let total = deg + min / MINUTES_IN_DEGREE + sec / SECONDS_IN_DEGREE;
    let sign = if total < 0.0 { Sign::Minus } else { Sign::Plus };

    let k = sign.signum();
    let (deg, min, sec) = (deg * k, min * k, sec * k);

    let min = min + deg.fract() * MINUTES_IN_DEGREE;
    let deg = deg.trunc();
    let sec = sec + min.fract() * SECONDS_IN_MINUTE;
    let min = min.trunc();

    let (extra_min, sec) = carry(sec, SECONDS_IN_MINUTE);
    let (extra_deg, min) = carry(min + extra_min, MINUTES_IN_DEGREE);
    let deg = deg + extra_deg;

    (
        sign,
        [unsigned_zero(deg), unsigned_zero(min), unsigned_zero(sec)],
    )
}

impl Angle {
    /// Construct the angle from the degrees, minutes and seconds.
    ///
    /// The sign of the whole angle is defined by the degrees,
    /// the minutes and seconds are used as magnitudes.
    ///
    /// ```
    /// # use dms::Angle;
    /// let a = Angle::new(-1.5, 10.0, 0.0);
    /// assert_eq!(a.dms(), (-1.0, 40.0, 0.0));
    ///
    /// let b = Angle::new(0.0, 0.0, 75.0);
    /// assert_eq!(b.dms(), (0.0, 1.0, 15.0));
    /// ```
    pub fn new(deg: f64, min: f64, sec: f64) -> Self {
        let (deg, is_positive) = deg.unsigned_abs();
        Self::with_sign(is_positive.into(), deg, min, sec)
    }

    /// Construct the angle from the explicit sign and the magnitudes
    /// of the degrees, minutes and seconds.
    pub fn with_sign(sign: Sign, deg: f64, min: f64, sec: f64) -> Self {
        let magnitude = Self::from_components([deg.abs(), min.abs(), sec.abs()], None);
        Self { sign, ..magnitude }.zero_is_positive()
    }

    fn from_components(components: [f64; 3], axis: Option<Axis>) -> Self {
        let [deg, min, sec] = components;
        let (sign, [deg, min, sec]) = normalize(deg, min, sec);
        Self {
            sign,
            deg,
            min,
            sec,
            axis,
        }
        .zero_is_positive()
    }

    fn signed_components(self) -> [f64; 3] {
        let k = self.sign.signum();
        [k * self.deg, k * self.min, k * self.sec]
    }

    fn zero_is_positive(self) -> Self {
        if self.is_zero() {
            Self {
                sign: Sign::Plus,
                ..self
            }
        } else {
            self
        }
    }

    /// Remember (or forget) the axis the angle belongs to
    pub fn with_axis(self, axis: Option<Axis>) -> Self {
        Self { axis, ..self }
    }

    /// The sign of the whole angle
    pub const fn sign(self) -> Sign {
        self.sign
    }

    /// Is the angle less than zero
    pub fn is_negative(self) -> bool {
        self.sign.is_negative()
    }

    /// The whole number of degrees, unsigned
    pub const fn whole_degrees(self) -> f64 {
        self.deg
    }

    /// The arc minutes component in the range `[0, 60)`
    pub const fn arc_minutes(self) -> f64 {
        self.min
    }

    /// The arc seconds component in the range `[0, 60)`
    pub const fn arc_seconds(self) -> f64 {
        self.sec
    }

    /// The components where the degrees carry the sign of the angle.
    ///
    /// For the angles between -1 and 0 degrees the negative zero is returned.
    pub fn dms(self) -> (f64, f64, f64) {
        (self.sign.signum() * self.deg, self.min, self.sec)
    }

    /// The axis remembered from the hemisphere letter
    pub const fn axis(self) -> Option<Axis> {
        self.axis
    }

    /// The hemisphere letter if the axis is known
    pub fn hemisphere(self) -> Option<Hemisphere> {
        self.axis
            .map(|axis| Hemisphere::with_axis_and_sign(axis, self.sign))
    }

    /// The same angle without the sign
    pub fn abs(self) -> Self {
        Self {
            sign: Sign::Plus,
            ..self
        }
    }

    /// The signed decimal degrees
    pub fn degrees(self) -> f64 {
        self.sign.signum() * (self.deg + self.min / MINUTES_IN_DEGREE + self.sec / SECONDS_IN_DEGREE)
    }

    /// The signed total arc minutes
    pub fn minutes(self) -> f64 {
        self.sign.signum() * (self.deg * MINUTES_IN_DEGREE + self.min + self.sec / SECONDS_IN_MINUTE)
    }

    /// The signed total arc seconds
    pub fn seconds(self) -> f64 {
        self.sign.signum() * (self.deg * SECONDS_IN_DEGREE + self.min * SECONDS_IN_MINUTE + self.sec)
    }

    /// The signed angle in radians
    pub fn radians(self) -> f64 {
        self.degrees().to_radians()
    }

    /// Interpret the angle as a latitude: the magnitude and the `N` or `S` letter.
    ///
    /// # Errors
    /// The angle was parsed as a longitude.
    pub fn as_latitude(self) -> Result<(Self, Hemisphere), ValueError> {
        self.as_axis(Axis::Latitude)
    }

    /// Interpret the angle as a longitude: the magnitude and the `E` or `W` letter.
    ///
    /// # Errors
    /// The angle was parsed as a latitude.
    pub fn as_longitude(self) -> Result<(Self, Hemisphere), ValueError> {
        self.as_axis(Axis::Longitude)
    }

    fn as_axis(self, axis: Axis) -> Result<(Self, Hemisphere), ValueError> {
        self.check_axis(axis)?;
        let hemisphere = Hemisphere::with_axis_and_sign(axis, self.sign);
        Ok((self.abs().with_axis(None), hemisphere))
    }

    pub(crate) fn check_axis(self, expected: Axis) -> Result<(), ValueError> {
        match self.axis {
            Some(found) if found != expected => Err(ValueError::AxisMismatch { expected, found }),
            _ => Ok(()),
        }
    }

    fn from_fields(fields: &ParsedFields) -> Result<Self, ValueError> {
        let deg_text = match fields.degrees.as_deref() {
            Some(deg) => deg,
            None if fields.minutes.is_some() || fields.seconds.is_some() => {
                return Err(ValueError::MissingDegrees)
            }
            None => "0",
        };

        let deg = deg_text
            .parse::<f64>()
            .ok()
            .filter(|deg| deg.is_finite() && deg.abs() < DEGREES_LIMIT)
            .ok_or_else(|| ValueError::InvalidDegrees(deg_text.to_string()))?;
        let min = fields
            .minutes
            .as_deref()
            .map(|min| parse_sexagesimal(min).ok_or_else(|| ValueError::InvalidMinutes(min.into())))
            .transpose()?;
        let sec = fields
            .seconds
            .as_deref()
            .map(|sec| parse_sexagesimal(sec).ok_or_else(|| ValueError::InvalidSeconds(sec.into())))
            .transpose()?;

        if deg_text.contains('.') && (min.is_some() || sec.is_some()) {
            return Err(ValueError::DecimalDegreesWithMinutes(deg_text.to_string()));
        }
        if let (Some(min_text), Some(_)) = (fields.minutes.as_deref(), sec) {
            if min_text.contains('.') {
                return Err(ValueError::DecimalMinutesWithSeconds(min_text.to_string()));
            }
        }

        let (deg, deg_is_positive) = deg.unsigned_abs();
        let sign = fields.resolve_sign(deg_text, !deg_is_positive)?;

        let angle = Self::with_sign(sign, deg, min.unwrap_or(0.0), sec.unwrap_or(0.0));
        Ok(angle.with_axis(fields.hemisphere.map(Hemisphere::axis)))
    }
}

/// Minutes and seconds should be finite numbers in the range `[0, 60)`
fn parse_sexagesimal(s: &str) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|x| (0.0..MINUTES_IN_DEGREE).contains(x))
}

impl Default for Angle {
    fn default() -> Self {
        Self::zero()
    }
}

impl Zero for Angle {
    fn zero() -> Self {
        Self {
            sign: Sign::Plus,
            deg: 0.0,
            min: 0.0,
            sec: 0.0,
            axis: None,
        }
    }

    fn is_zero(&self) -> bool {
        self.deg == 0.0 && self.min == 0.0 && self.sec == 0.0
    }
}

impl From<f64> for Angle {
    /// Decimal degrees
    fn from(value: f64) -> Self {
        Self::new(value, 0.0, 0.0)
    }
}

impl TryFrom<&ParsedFields> for Angle {
    type Error = ValueError;

    fn try_from(fields: &ParsedFields) -> Result<Self, Self::Error> {
        Self::from_fields(fields).map_err(|err| {
            debug!("Cannot build an angle from {fields:?}: {err}");
            err
        })
    }
}

impl TryFrom<ParsedFields> for Angle {
    type Error = ValueError;

    fn try_from(fields: ParsedFields) -> Result<Self, Self::Error> {
        Self::try_from(&fields)
    }
}

impl FromStr for Angle {
    type Err = ParseAngleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = Parser::new().parse(s)?;
        Ok(Self::try_from(&fields)?)
    }
}

impl Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let [d1, m1, s1] = self.signed_components();
        let [d2, m2, s2] = rhs.signed_components();
        let axis = if self.axis == rhs.axis {
            self.axis
        } else {
            None
        };

        let sum = Self::from_components([d1 + d2, m1 + m2, s1 + s2], axis);
        // zero has no hemisphere
        if sum.is_zero() {
            sum.with_axis(None)
        } else {
            sum
        }
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            sign: -self.sign,
            ..self
        }
        .zero_is_positive()
    }
}

impl Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Sum for Angle {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl fmt::Display for Angle {
    /// Decimal degrees by default, full DMS in the alternate (`{:#}`) mode.
    /// The hemisphere letter is appended when the axis is known.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = if f.alternate() {
            FormatConfig::default()
        } else {
            FormatConfig::new(Unit::Degree, None)
        };
        f.write_str(&config.render(*self, self.axis))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;

    use crate::coord::{Pole, RotationalDirection};

    use super::*;

    fn assert_dms(angle: Angle, expected: (f64, f64, f64)) {
        let (deg, min, sec) = angle.dms();
        assert_abs_diff_eq!(deg, expected.0, epsilon = 1e-9);
        assert_abs_diff_eq!(min, expected.1, epsilon = 1e-9);
        assert_abs_diff_eq!(sec, expected.2, epsilon = 1e-6);
    }

    #[test]
    fn default_is_zero() {
        let zero = Angle::default();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());
        assert_eq!(zero.dms(), (0.0, 0.0, 0.0));
        assert_eq!(zero.axis(), None);
    }

    #[test]
    fn already_normalized() {
        let a = Angle::new(1.0, 2.0, 3.0);
        assert_eq!(a.dms(), (1.0, 2.0, 3.0));
        assert_eq!(a.sign(), Sign::Plus);
    }

    #[test]
    fn degree_sign_applies_to_all() {
        let a = Angle::new(-1.0, 2.0, 3.33);
        assert!(a.is_negative());
        assert_eq!(a.whole_degrees(), 1.0);
        assert_eq!(a.arc_minutes(), 2.0);
        assert_abs_diff_eq!(a.arc_seconds(), 3.33);
    }

    #[test]
    fn minute_and_second_signs_ignored() {
        assert_eq!(Angle::new(1.0, -2.0, -3.5), Angle::new(1.0, 2.0, 3.5));
        assert_eq!(Angle::new(-1.5, -10.0, 0.0), Angle::new(-1.5, 10.0, 0.0));
    }

    #[test]
    fn carry_seconds() {
        assert_eq!(Angle::new(0.0, 0.0, 75.0).dms(), (0.0, 1.0, 15.0));
        assert_eq!(Angle::new(0.0, 10.0, 135.0).dms(), (0.0, 12.0, 15.0));
        assert_eq!(Angle::new(0.0, 59.0, 135.0).dms(), (1.0, 1.0, 15.0));
    }

    #[test]
    fn carry_gives_the_same_degrees() {
        let a = Angle::new(0.0, 0.0, 75.0);
        let b = Angle::new(0.0, 1.0, 15.0);
        assert_eq!(a.degrees(), b.degrees());
    }

    #[test]
    fn carry_minutes() {
        assert_eq!(Angle::new(1.0, 120.0, 0.0).dms(), (3.0, 0.0, 0.0));
        assert_eq!(Angle::new(1.0, 60.0, 60.0).dms(), (2.0, 1.0, 0.0));
    }

    #[test]
    fn fraction_of_degree_flows_down() {
        assert_eq!(Angle::new(1.5, 0.0, 0.0).dms(), (1.0, 30.0, 0.0));
        assert_eq!(Angle::new(1.5, 10.0, 0.0).dms(), (1.0, 40.0, 0.0));
        assert_eq!(Angle::new(-1.5, 10.0, 0.0).dms(), (-1.0, 40.0, 0.0));
        assert_eq!(Angle::new(1.5, 10.5, 10.0).dms(), (1.0, 40.0, 40.0));
    }

    #[test]
    fn decimal_degrees_to_dms() {
        assert_dms(Angle::new(1.051_667, 0.0, 0.0), (1.0, 3.0, 6.0012));
        assert_dms(Angle::from(-1.051_667), (-1.0, 3.0, 6.0012));
    }

    #[test]
    fn small_negative_keeps_the_sign() {
        let a = Angle::with_sign(Sign::Minus, 0.0, 30.0, 0.0);
        assert!(a.is_negative());
        let (deg, min, _) = a.dms();
        assert!(deg.is_sign_negative());
        assert_eq!(min, 30.0);
        assert_abs_diff_eq!(a.degrees(), -0.5);
    }

    #[test]
    fn negative_zero_is_positive() {
        let a = Angle::new(-0.0, 0.0, 0.0);
        assert!(!a.is_negative());
        assert!(!Angle::with_sign(Sign::Minus, 0.0, 0.0, 0.0).is_negative());
        assert!(!(-Angle::zero()).is_negative());
    }

    #[test]
    fn degree_formula() {
        let a = Angle::new(12.0, 34.0, 56.7);
        assert_abs_diff_eq!(a.degrees(), 12.0 + 34.0 / 60.0 + 56.7 / 3600.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.minutes(), 12.0 * 60.0 + 34.0 + 56.7 / 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(a.seconds(), 12.0 * 3600.0 + 34.0 * 60.0 + 56.7, epsilon = 1e-9);
    }

    #[test]
    fn negative_conversions() {
        let a = Angle::new(-1.0, 3.0, 6.0);
        assert_abs_diff_eq!(a.degrees(), -1.051_667, epsilon = 1e-6);
        assert_abs_diff_eq!(a.minutes(), -63.1, epsilon = 1e-9);
        assert_abs_diff_eq!(a.seconds(), -3786.0, epsilon = 1e-9);
    }

    #[test]
    fn radians() {
        assert_abs_diff_eq!(Angle::from(90.0).radians(), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(Angle::from(-90.0).radians(), -FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn add() {
        let sum = Angle::new(1.0, 2.0, 3.0) + Angle::new(4.0, 5.0, 6.0);
        assert_eq!(sum.dms(), (5.0, 7.0, 9.0));
    }

    #[test]
    fn add_opposite_gives_zero() {
        assert!((Angle::new(-1.0, 0.0, 0.0) + Angle::new(1.0, 0.0, 0.0)).is_zero());
        assert!((Angle::new(-1.0, 15.0, 0.0) + Angle::new(1.0, 15.0, 0.0)).is_zero());
    }

    #[test]
    fn add_with_carry() {
        let sum = Angle::new(118.0, 51.0, 27.95) + Angle::new(47.0, 38.0, 19.75);
        assert_dms(sum, (166.0, 29.0, 47.7));
    }

    #[test]
    fn add_mixed_signs_borrows() {
        let sum = Angle::new(1.0, 0.0, 0.0) + Angle::new(-0.0, 0.0, 0.0) + -Angle::new(0.0, 30.0, 0.0);
        assert_eq!(sum.dms(), (0.0, 30.0, 0.0));

        let sum = Angle::new(-2.0, 0.0, 0.0) + Angle::new(0.0, 0.0, 1.0);
        assert_eq!(sum.dms(), (-1.0, 59.0, 59.0));
    }

    #[test]
    fn add_is_commutative() {
        let a = Angle::new(-13.0, 42.0, 7.25);
        let b = Angle::new(5.0, 59.0, 59.5);
        assert_eq!(a + b, b + a);
    }

    #[test]
    fn sub() {
        let diff = Angle::new(1.0, 0.0, 0.0) - Angle::new(0.0, 0.0, 1.0);
        assert_eq!(diff.dms(), (0.0, 59.0, 59.0));

        let diff = Angle::new(318.0, 51.0, 27.96) - Angle::new(47.0, 38.0, 19.74);
        assert_dms(diff, (271.0, 13.0, 8.22));
    }

    #[test]
    fn sub_below_zero() {
        let diff = Angle::new(1.0, 0.0, 0.0) - Angle::new(2.0, 30.0, 0.0);
        assert_eq!(diff.dms(), (-1.0, 30.0, 0.0));
    }

    #[test]
    fn sub_self_is_zero() {
        let a = Angle::new(1.0, 2.0, 3.33);
        let zero = a - a;
        assert!(zero.is_zero());
        assert_eq!(zero, Angle::zero());
    }

    #[test]
    fn tagged_sub_self_is_zero() {
        let lat: Angle = "45°N".parse().unwrap();
        let zero = lat - lat;
        assert_eq!(zero, Angle::zero());
        assert_eq!(zero.axis(), None);

        let lon: Angle = "45°30'W".parse().unwrap();
        assert_eq!(lon + -lon, Angle::default());
    }

    #[test]
    fn sum_of_angles() {
        let total: Angle = (0..10).map(|_| Angle::new(0.0, 0.0, 0.1)).sum();
        assert_dms(total, (0.0, 0.0, 1.0));

        let total: Angle = (0..120).map(|_| Angle::new(0.0, 0.0, 30.0)).sum();
        assert_eq!(total.dms(), (1.0, 0.0, 0.0));
    }

    #[test]
    fn as_latitude() {
        let (lat, hemi) = Angle::new(1.0, 2.0, 3.0).as_latitude().unwrap();
        assert_eq!(hemi, Hemisphere::Lat(Pole::North));
        assert_eq!(lat.dms(), (1.0, 2.0, 3.0));

        let (lat, hemi) = Angle::new(-1.0, 2.0, 3.0).as_latitude().unwrap();
        assert_eq!(hemi, Hemisphere::Lat(Pole::South));
        assert_eq!(lat.dms(), (1.0, 2.0, 3.0));
        assert!(!lat.is_negative());
    }

    #[test]
    fn as_longitude() {
        let (_, hemi) = Angle::new(1.0, 0.0, 0.0).as_longitude().unwrap();
        assert_eq!(hemi, Hemisphere::Lon(RotationalDirection::East));

        let (_, hemi) = Angle::new(-1.0, 0.0, 0.0).as_longitude().unwrap();
        assert_eq!(hemi, Hemisphere::Lon(RotationalDirection::West));
    }

    #[test]
    fn longitude_cannot_become_latitude() {
        let lon: Angle = "12.582439°W".parse().unwrap();
        assert_eq!(lon.axis(), Some(Axis::Longitude));
        assert_eq!(
            lon.as_latitude().unwrap_err(),
            ValueError::AxisMismatch {
                expected: Axis::Latitude,
                found: Axis::Longitude
            }
        );
        assert!(lon.as_longitude().is_ok());
    }

    #[test]
    fn hemisphere_follows_the_sign() {
        let lat: Angle = "1° 3′ 6″ S".parse().unwrap();
        assert_eq!(lat.hemisphere(), Some(Hemisphere::Lat(Pole::South)));
        assert_eq!((-lat).hemisphere(), Some(Hemisphere::Lat(Pole::North)));
        assert_eq!(Angle::new(1.0, 0.0, 0.0).hemisphere(), None);
    }

    #[test]
    fn axis_kept_only_when_equal() {
        let lat1: Angle = "1°N".parse().unwrap();
        let lat2: Angle = "2°S".parse().unwrap();
        let lon: Angle = "3°E".parse().unwrap();

        let sum = lat1 + lat2;
        assert_eq!(sum.axis(), Some(Axis::Latitude));
        assert_eq!(sum.hemisphere(), Some(Hemisphere::Lat(Pole::South)));
        assert_eq!((lat1 + lon).axis(), None);
    }

    #[test]
    fn display_decimal() {
        assert_eq!(Angle::new(1.5, 0.0, 0.0).to_string(), "1.5°");
        assert_eq!(Angle::new(-1.0, 30.0, 0.0).to_string(), "-1.5°");
        assert_eq!(Angle::zero().to_string(), "0°");
    }

    #[test]
    fn display_dms() {
        assert_eq!(format!("{:#}", Angle::new(1.0, 2.0, 3.5)), "1° 2′ 3.5″");
        assert_eq!(format!("{:#}", Angle::new(-1.0, 2.0, 3.0)), "-1° 2′ 3″");
    }

    #[test]
    fn display_with_hemisphere() {
        let lat: Angle = "1°30'S".parse().unwrap();
        assert_eq!(lat.to_string(), "1.5° S");
        assert_eq!(format!("{lat:#}"), "1° 30′ 0″ S");
    }
}
