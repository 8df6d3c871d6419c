// Copyright (c) 2024 Botho Foundation

//! Draw date parsing.
//!
//! Dates are entered as `dd-mm-yyyy` or `dd-mm-yy`. Two-digit years from 70
//! upward fall in the 1900s, the rest in the 2000s.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// First two-digit year read as 19xx.
const CENTURY_PIVOT: i32 = 70;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("expected dd-mm-yyyy or dd-mm-yy, got {0} characters")]
    BadLength(usize),

    #[error("expected '-' separators at positions 3 and 6")]
    BadSeparators,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{day:02}-{month:02}-{year} is not a calendar date")]
    NotACalendarDate { day: u32, month: u32, year: i32 },
}

/// A validated draw date, keeping the text it was entered as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawDate {
    date: NaiveDate,
    input: String,
}

impl DrawDate {
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let input = input.trim();
        let length = input.chars().count();
        if length != 8 && length != 10 {
            return Err(DateError::BadLength(length));
        }
        let bytes = input.as_bytes();
        if bytes[2] != b'-' || bytes[5] != b'-' {
            return Err(DateError::BadSeparators);
        }

        let day: u32 = number(&input[0..2])?;
        let month: u32 = number(&input[3..5])?;
        let mut year: i32 = number(&input[6..])?;
        if year < 100 {
            year += if year >= CENTURY_PIVOT { 1900 } else { 2000 };
        }

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(DateError::NotACalendarDate { day, month, year })?;
        Ok(Self {
            date,
            input: input.to_string(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The date as it was entered.
    pub fn as_str(&self) -> &str {
        &self.input
    }

    /// Four-digit year form, `dd-mm-yyyy`.
    pub fn canonical(&self) -> String {
        format!(
            "{:02}-{:02}-{:04}",
            self.date.day(),
            self.date.month(),
            self.date.year()
        )
    }
}

fn number<T: FromStr>(digits: &str) -> Result<T, DateError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateError::NotANumber(digits.to_string()));
    }
    digits
        .parse()
        .map_err(|_| DateError::NotANumber(digits.to_string()))
}

impl FromStr for DrawDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DrawDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.input)
    }
}

impl Serialize for DrawDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.input)
    }
}

impl<'de> Deserialize<'de> for DrawDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let input = String::deserialize(deserializer)?;
        DrawDate::parse(&input).map_err(serde::de::Error::custom)
    }
}
