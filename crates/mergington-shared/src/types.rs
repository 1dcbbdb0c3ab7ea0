use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{EMAIL_MAX_LEN, EMAIL_PATTERN, HEX_COLOR_PATTERN, TIME_FORMAT};
use crate::error::{Result, ValidationError};

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEX_COLOR_PATTERN).expect("static hex color pattern"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("static email pattern"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "TEACHER",
            Self::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TEACHER" => Some(Self::Teacher),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Beginner => "BEGINNER",
            Self::Intermediate => "INTERMEDIATE",
            Self::Advanced => "ADVANCED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    /// Case-insensitive match on either the code or the display name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|level| {
            level.code().eq_ignore_ascii_case(value) || level.display_name().eq_ignore_ascii_case(value)
        })
    }
}

/// Normalised student email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim().to_lowercase();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }
        if !EMAIL.is_match(&trimmed) {
            return Err(ValidationError::InvalidEmail(value.to_string()));
        }
        if trimmed.len() > EMAIL_MAX_LEN {
            return Err(ValidationError::EmailTooLong {
                len: trimmed.len(),
                max: EMAIL_MAX_LEN,
            });
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Weekly meeting pattern of an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDetails {
    days: Vec<String>,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl ScheduleDetails {
    pub fn new(days: Vec<String>, start_time: NaiveTime, end_time: NaiveTime) -> Result<Self> {
        let days: Vec<String> = days
            .into_iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();
        if days.is_empty() {
            return Err(ValidationError::Empty { field: "days" });
        }
        if start_time > end_time {
            return Err(ValidationError::ScheduleOrder {
                start: start_time.format(TIME_FORMAT).to_string(),
                end: end_time.format(TIME_FORMAT).to_string(),
            });
        }
        Ok(Self {
            days,
            start_time,
            end_time,
        })
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn meets_on(&self, day: &str) -> bool {
        self.days.iter().any(|d| d == day)
    }

    /// True when the whole meeting fits inside `[start, end]`.
    pub fn within(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time >= start && self.end_time <= end
    }
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_time(value: &str) -> std::result::Result<NaiveTime, chrono::ParseError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
}

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// Trimmed value, or `Empty` when nothing is left.
pub(crate) fn require_non_blank(value: &str, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(trimmed.to_string())
    }
}

pub(crate) fn require_hex_color(value: &str, field: &'static str) -> Result<String> {
    let trimmed = require_non_blank(value, field)?;
    if is_hex_color(&trimmed) {
        Ok(trimmed)
    } else {
        Err(ValidationError::InvalidColor {
            field,
            value: value.to_string(),
        })
    }
}
