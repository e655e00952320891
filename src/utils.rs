//! Utilities functions which do not linked to domain

use std::ops::Neg;

#[doc(hidden)]
#[macro_export]
/// Implements `From` trait for newtype-like enum variants
macro_rules! enum_trivial_from_impl {
    ($from:ty => $to:ty:$constructor:ident) => {
        impl From<$from> for $to {
            fn from(val: $from) -> Self {
                Self::$constructor(val)
            }
        }
    };
}

/// Allow conversion of a signed value into its unsigned equivalent
/// by dropping the sign away
pub(crate) trait ToUnsigned<U>: Default + Copy + PartialOrd + Neg<Output = Self> {
    /// represent the source (signed) type as target (unsigned) type
    fn as_type(self) -> U;

    /// Converts to unsigned absolute value
    fn unsigned_abs(self) -> (U, bool) {
        if self >= Self::default() {
            (self.as_type(), true)
        } else {
            ((-self).as_type(), false)
        }
    }
}

impl ToUnsigned<Self> for f64 {
    fn as_type(self) -> Self {
        self
    }
}

/// Split the value into the whole number of `base`-sized units (may be negative)
/// and the remainder in the range `[0, base)`.
///
/// The bounds are compared strictly, no epsilon is applied.
pub(crate) fn carry(value: f64, base: f64) -> (f64, f64) {
    let mut units = (value / base).floor();
    let mut rem = value - units * base;

    // rounding can push the remainder exactly onto the bounds
    if rem >= base {
        rem -= base;
        units += 1.0;
    } else if rem < 0.0 {
        rem += base;
        units -= 1.0;
    }

    (units, rem)
}

/// Replace the negative zero with the positive one
pub(crate) fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
