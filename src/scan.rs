//! Splitting the DMS text into the classified tokens.
//!
//! The scanner is lazy: a token is produced only when the previous one
//! was consumed with [`Scanner::advance`].

use std::{convert::TryFrom, fmt};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    angle::consts::{
        ARC_MINUTE_SIGN, ARC_SECOND_SIGN, ASCII_ARC_MINUTE_SIGN, ASCII_ARC_SECOND_SIGN,
        ASCII_DEGREE_SIGN, DEGREE_SIGN,
    },
    coord::{Hemisphere, Sign},
};

lazy_static! {
    static ref RE_NUMBER: Regex =
        Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").expect("Number regex is valid");
}

/// Line and column (both starting from 1) of a token in the source text
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pos {
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
}

impl Default for Pos {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The semantic class of a token
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenType {
    /// Digits only
    Int,
    /// Digits with the decimal point
    Real,
    /// `+` or `-`
    Sign(Sign),
    /// `°`, `d` or `*`
    Degree,
    /// `′`, `'` or `m`
    Minute,
    /// `″`, `"` or `s`
    Second,
    /// One of `N`, `S`, `E`, `W`
    Hemisphere(Hemisphere),
    /// Any other character
    Illegal,
    /// No more characters
    EndOfText,
}

impl TokenType {
    fn classify(ch: char) -> Self {
        match ch {
            DEGREE_SIGN | ASCII_DEGREE_SIGN | 'd' => Self::Degree,
            ARC_MINUTE_SIGN | ASCII_ARC_MINUTE_SIGN | 'm' => Self::Minute,
            ARC_SECOND_SIGN | ASCII_ARC_SECOND_SIGN | 's' => Self::Second,
            _ => {
                if let Ok(sign) = Sign::try_from(ch) {
                    Self::Sign(sign)
                } else if let Ok(hemisphere) = Hemisphere::try_from(ch) {
                    Self::Hemisphere(hemisphere)
                } else {
                    Self::Illegal
                }
            }
        }
    }
}

/// A piece of the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the token means
    pub kind: TokenType,
    /// The exact source text (empty for the end of text)
    pub literal: String,
    /// Where the token starts
    pub pos: Pos,
}

impl Token {
    /// Is it the end-of-text sentinel
    pub fn is_end_of_text(&self) -> bool {
        self.kind == TokenType::EndOfText
    }
}

/// Produces the tokens one by one, remembering the current one
#[derive(Debug)]
pub struct Scanner<'a> {
    src: &'a str,
    offset: usize,
    pos: Pos,
    this: Token,
}

impl<'a> Scanner<'a> {
    /// Start scanning the text, the first token becomes current
    pub fn new(src: &'a str) -> Self {
        let mut scanner = Self {
            src,
            offset: 0,
            pos: Pos::default(),
            this: Token {
                kind: TokenType::EndOfText,
                literal: String::new(),
                pos: Pos::default(),
            },
        };
        scanner.this = scanner.scan();
        scanner
    }

    /// The token under the cursor, not consumed yet
    pub fn current(&self) -> &Token {
        &self.this
    }

    /// Consume the current token and return the following one.
    /// The end-of-text token is returned repeatedly once reached.
    pub fn advance(&mut self) -> &Token {
        if !self.this.is_end_of_text() {
            self.this = self.scan();
        }
        &self.this
    }

    fn rest(&self) -> &'a str {
        &self.src[self.offset..]
    }

    fn bump(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.rest().chars().next() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump(ch);
        }
    }

    fn scan(&mut self) -> Token {
        self.skip_whitespace();
        let pos = self.pos;

        if let Some(number) = RE_NUMBER.find(self.rest()) {
            let literal = number.as_str();
            let kind = if literal.contains('.') {
                TokenType::Real
            } else {
                TokenType::Int
            };
            literal.chars().for_each(|ch| self.bump(ch));
            return Token {
                kind,
                literal: literal.to_string(),
                pos,
            };
        }

        match self.rest().chars().next() {
            Some(ch) => {
                self.bump(ch);
                Token {
                    kind: TokenType::classify(ch),
                    literal: ch.to_string(),
                    pos,
                }
            }
            None => Token {
                kind: TokenType::EndOfText,
                literal: String::new(),
                pos,
            },
        }
    }
}
