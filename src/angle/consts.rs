pub(crate) const MINUTES_IN_DEGREE: f64 = 60.0;
pub(crate) const SECONDS_IN_MINUTE: f64 = 60.0;
pub(crate) const SECONDS_IN_DEGREE: f64 = MINUTES_IN_DEGREE * SECONDS_IN_MINUTE;

/// 2^63: the whole degrees are written as an integer literal which should fit into `i64`
pub(crate) const DEGREES_LIMIT: f64 = 9_223_372_036_854_775_808.0;

pub(crate) const DEGREE_SIGN: char = '°';
pub(crate) const ARC_MINUTE_SIGN: char = '′';
pub(crate) const ARC_SECOND_SIGN: char = '″';

pub(crate) const ASCII_DEGREE_SIGN: char = '*';
pub(crate) const ASCII_ARC_MINUTE_SIGN: char = '\'';
pub(crate) const ASCII_ARC_SECOND_SIGN: char = '"';
