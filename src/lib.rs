//! Parsing and formatting of the degree-minute-second angle notations
//! used for the geographic coordinates:
//! `1° 3′ 6″ S`, `-1°2'3.4"`, `12.582439°W`.
//!
//! ```
//! use dms::{Angle, FormatConfig, Unit};
//!
//! let lat: Angle = "1° 3′ 6″ S".parse().unwrap();
//! assert!((lat.degrees() + 1.051_667).abs() < 1e-6);
//!
//! let config = FormatConfig::new(Unit::Minute, Some(2)).with_separator("");
//! assert_eq!(dms::format(&lat, &config, None).unwrap(), "-1°3.10′");
//! assert_eq!(config.format_lat(&lat).unwrap(), "1°3.10′S");
//! ```

// do not warn on older Rust versions
#![allow(unknown_lints)]
//
// The following list was generated with the command
//   $ rustc -W help | grep ' allow ' | awk '{print $1}' | tr - _ | sort | xargs -I{} echo '#![warn({})]'
//
#![warn(absolute_paths_not_starting_with_crate)]
#![warn(anonymous_parameters)]
#![warn(deprecated_in_future)]
#![warn(elided_lifetimes_in_paths)]
#![warn(explicit_outlives_requirements)]
#![warn(invalid_html_tags)]
#![warn(keyword_idents)]
#![warn(macro_use_extern_crate)]
#![warn(meta_variable_misuse)]
#![warn(missing_copy_implementations)]
#![warn(missing_crate_level_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(single_use_lifetimes)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
// conflicts with the `clippy::redundant_pub_crate`
#![allow(unreachable_pub)]
// !!! NO UNSAFE
#![forbid(unsafe_code)]
#![warn(unstable_features)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]
#![warn(unused_labels)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]
#![warn(unused_results)]
//
// additional recommendations
#![deny(clippy::mem_forget)]
// suppress some pedantic warnings
#![allow(clippy::non_ascii_literal)]
#![allow(clippy::must_use_candidate)]
// `use super::*` in tests
#![cfg_attr(test, allow(clippy::wildcard_imports))]

use std::convert::TryFrom;

pub use angle::{Angle, ParseAngleError, ValueError};
pub use coord::{
    Axis, Hemisphere, ParseDirectionError, ParseHemisphereError, ParsePoleError, ParseSignError,
    Pole, RotationalDirection, Sign,
};
pub use format::{FormatConfig, FormatError, Unit};
pub use parser::{ParsedFields, Parser, SyntaxError, SyntaxErrorKind};
pub use scan::{Pos, Scanner, Token, TokenType};

mod angle;
mod coord;
mod format;
mod parser;
mod scan;
mod utils;

/// Validate the text and extract the raw DMS fields from it
///
/// # Errors
/// The text is not a DMS angle. The error points to the offending token.
pub fn parse(text: &str) -> Result<ParsedFields, SyntaxError> {
    Parser::new().parse(text)
}

/// Parse the text and convert the fields into the normalized angle
///
/// # Errors
/// Either the syntax is wrong or the fields cannot form an angle.
pub fn parse_angle(text: &str) -> Result<Angle, ParseAngleError> {
    let fields = parse(text)?;
    Ok(Angle::try_from(&fields)?)
}

/// Write the angle according to the configuration
///
/// # Errors
/// See [`FormatConfig::format`]
pub fn format(angle: &Angle, config: &FormatConfig, axis: Option<Axis>) -> Result<String, FormatError> {
    config.format(angle, axis)
}
