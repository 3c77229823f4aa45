//! Decoding of the semi-structured text columns of a round record.
//!
//! `kill_victim_puuids` and `damage_done` hold literal notation such as
//! `['a', 'b']` or `{'headshots': 1, 'bodyshots': 2, 'legshots': 0}`. The text
//! is parsed into a [`Literal`] tree and then narrowed to a typed value. A
//! record whose field fails to decode is logged and treated as if the field
//! were absent, so one bad row never affects another player's numbers.

use std::{iter::Peekable, str::CharIndices};

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};
use thiserror::Error;
use tracing::warn;

use crate::rounds::RoundRecord;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("trailing input at offset {0}")]
    TrailingInput(usize),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("expected {expected}, found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("'{0}' must be a non-negative integer")]
    InvalidCount(String),
}

/// Parsed literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
    List(Vec<Literal>),
    Map(Vec<(Literal, Literal)>),
}

impl Literal {
    fn kind(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Int(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Bool(_) => "boolean",
            Literal::None => "none",
            Literal::List(_) => "list",
            Literal::Map(_) => "mapping",
        }
    }

    /// Looks up a string key; later duplicates win
    fn get(&self, key: &str) -> Option<&Literal> {
        match self {
            Literal::Map(entries) => entries
                .iter()
                .rev()
                .find(|(k, _)| matches!(k, Literal::Str(s) if s == key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

pub fn parse_literal(text: &str) -> Result<Literal, DecodeError> {
    let mut parser = LiteralParser::new(text);
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    match parser.chars.peek() {
        Some(&(offset, _)) => Err(DecodeError::TrailingInput(offset)),
        None => Ok(value),
    }
}

struct LiteralParser<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> LiteralParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn peek(&mut self) -> Result<(usize, char), DecodeError> {
        self.skip_whitespace();
        self.chars.peek().copied().ok_or(DecodeError::UnexpectedEnd)
    }

    fn expect(&mut self, expected: char) -> Result<(), DecodeError> {
        match self.peek()? {
            (_, c) if c == expected => {
                self.chars.next();
                Ok(())
            }
            (offset, found) => Err(DecodeError::UnexpectedChar { found, offset }),
        }
    }

    fn parse_value(&mut self) -> Result<Literal, DecodeError> {
        match self.peek()? {
            (_, '[') => self.parse_sequence('[', ']').map(Literal::List),
            (_, '(') => self.parse_sequence('(', ')').map(Literal::List),
            (_, '{') => self.parse_map(),
            (_, quote @ ('\'' | '"')) => self.parse_string(quote).map(Literal::Str),
            (_, c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.parse_number(),
            (_, c) if c.is_alphabetic() => self.parse_identifier(),
            (offset, found) => Err(DecodeError::UnexpectedChar { found, offset }),
        }
    }

    fn parse_sequence(&mut self, open: char, close: char) -> Result<Vec<Literal>, DecodeError> {
        self.expect(open)?;
        let mut items = Vec::new();
        loop {
            if self.peek()?.1 == close {
                self.chars.next();
                return Ok(items);
            }
            items.push(self.parse_value()?);
            match self.peek()? {
                (_, ',') => {
                    self.chars.next();
                }
                (_, c) if c == close => {}
                (offset, found) => return Err(DecodeError::UnexpectedChar { found, offset }),
            }
        }
    }

    fn parse_map(&mut self) -> Result<Literal, DecodeError> {
        self.expect('{')?;
        let mut entries = Vec::new();
        loop {
            if self.peek()?.1 == '}' {
                self.chars.next();
                return Ok(Literal::Map(entries));
            }
            let key = self.parse_value()?;
            self.expect(':')?;
            let value = self.parse_value()?;
            entries.push((key, value));
            match self.peek()? {
                (_, ',') => {
                    self.chars.next();
                }
                (_, '}') => {}
                (offset, found) => return Err(DecodeError::UnexpectedChar { found, offset }),
            }
        }
    }

    fn parse_string(&mut self, quote: char) -> Result<String, DecodeError> {
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            match self.chars.next() {
                None => return Err(DecodeError::UnexpectedEnd),
                Some((_, c)) if c == quote => return Ok(out),
                Some((_, '\\')) => match self.chars.next() {
                    None => return Err(DecodeError::UnexpectedEnd),
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, 'r')) => out.push('\r'),
                    Some((_, other)) => out.push(other),
                },
                Some((_, c)) => out.push(c),
            }
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.chars.peek().map_or(self.text.len(), |&(i, _)| i);
        let mut end = start;
        while let Some((i, c)) = self.chars.next_if(|&(_, c)| pred(c)) {
            end = i + c.len_utf8();
        }
        &self.text[start..end]
    }

    fn parse_number(&mut self) -> Result<Literal, DecodeError> {
        let token = self.take_while(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.' | '_')
        });
        let cleaned = token.replace('_', "");
        if let Ok(value) = cleaned.parse::<i64>() {
            return Ok(Literal::Int(value));
        }
        match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Literal::Float(value)),
            _ => Err(DecodeError::InvalidNumber(token.to_string())),
        }
    }

    fn parse_identifier(&mut self) -> Result<Literal, DecodeError> {
        let token = self.take_while(|c| c.is_alphanumeric() || c == '_');
        match token {
            "True" | "true" => Ok(Literal::Bool(true)),
            "False" | "false" => Ok(Literal::Bool(false)),
            "None" | "null" => Ok(Literal::None),
            other => Err(DecodeError::UnknownIdentifier(other.to_string())),
        }
    }
}

/// Shot regions tracked in a damage breakdown, keyed by their column name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum ShotRegion {
    #[strum(serialize = "headshots")]
    Head,
    #[strum(serialize = "bodyshots")]
    Body,
    #[strum(serialize = "legshots")]
    Leg,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageBreakdown {
    pub headshots: u64,
    pub bodyshots: u64,
    pub legshots: u64,
}

impl DamageBreakdown {
    pub fn new(headshots: u64, bodyshots: u64, legshots: u64) -> Self {
        Self {
            headshots,
            bodyshots,
            legshots,
        }
    }

    /// Saturates at `u64::MAX`, as do the sums in [`DamageBreakdown::add`]
    pub fn total_shots(&self) -> u64 {
        self.headshots
            .saturating_add(self.bodyshots)
            .saturating_add(self.legshots)
    }

    pub fn add(&mut self, other: &DamageBreakdown) {
        self.headshots = self.headshots.saturating_add(other.headshots);
        self.bodyshots = self.bodyshots.saturating_add(other.bodyshots);
        self.legshots = self.legshots.saturating_add(other.legshots);
    }

    fn region_mut(&mut self, region: ShotRegion) -> &mut u64 {
        match region {
            ShotRegion::Head => &mut self.headshots,
            ShotRegion::Body => &mut self.bodyshots,
            ShotRegion::Leg => &mut self.legshots,
        }
    }
}

/// Decodes a victim id list; absent or blank input is an empty list
pub fn decode_victim_ids(raw: Option<&str>) -> Result<Vec<String>, DecodeError> {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(Vec::new());
    };

    match parse_literal(text)? {
        Literal::List(items) => items
            .into_iter()
            .map(|item| match item {
                Literal::Str(id) => Ok(id),
                other => Err(DecodeError::UnexpectedType {
                    expected: "string",
                    found: other.kind(),
                }),
            })
            .collect(),
        other => Err(DecodeError::UnexpectedType {
            expected: "list",
            found: other.kind(),
        }),
    }
}

/// Decodes a damage breakdown; `Ok(None)` when the field is absent or blank
pub fn decode_damage_breakdown(raw: Option<&str>) -> Result<Option<DamageBreakdown>, DecodeError> {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };

    let literal = parse_literal(text)?;
    if !matches!(literal, Literal::Map(_)) {
        return Err(DecodeError::UnexpectedType {
            expected: "mapping",
            found: literal.kind(),
        });
    }

    let mut breakdown = DamageBreakdown::default();
    for region in ShotRegion::iter() {
        let key = region.as_ref();
        let count = match literal.get(key) {
            None => 0,
            Some(Literal::Int(value)) if *value >= 0 => *value as u64,
            Some(Literal::Float(value))
                if *value >= 0.0 && value.fract() == 0.0 && *value < u64::MAX as f64 =>
            {
                *value as u64
            }
            Some(_) => return Err(DecodeError::InvalidCount(key.to_string())),
        };
        *breakdown.region_mut(region) = count;
    }

    Ok(Some(breakdown))
}

/// Victims killed in this round, or an empty list if the field is malformed
pub fn victims_of(record: &RoundRecord) -> Vec<String> {
    decode_victim_ids(record.victim_ids.as_deref()).unwrap_or_else(|error| {
        warn!(
            player_id = %record.player_id,
            raw = ?record.victim_ids,
            %error,
            "Skipping malformed victim list"
        );
        Vec::new()
    })
}

/// Shot breakdown of this round, or `None` if the field is absent or malformed
pub fn damage_of(record: &RoundRecord) -> Option<DamageBreakdown> {
    decode_damage_breakdown(record.damage_breakdown.as_deref()).unwrap_or_else(|error| {
        warn!(
            player_id = %record.player_id,
            raw = ?record.damage_breakdown,
            %error,
            "Skipping malformed damage breakdown"
        );
        None
    })
}
