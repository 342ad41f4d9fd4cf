//! Show booking form.

use chrono::{DateTime, NaiveDateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{FormErrors, REQUIRED};
use crate::models::show;

/// Wall-clock formats accepted besides RFC 3339; read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Display format used to prefill the start time.
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A show booking as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: Option<i32>,
    pub venue_id: Option<i32>,
    /// RFC 3339, or `YYYY-MM-DD HH:MM[:SS]` taken as UTC
    pub start_time: Option<String>,
}

/// A validated booking, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTimeWithTimeZone,
}

impl ShowForm {
    /// Blank form with the start time prefilled to `now`.
    pub fn prefilled(now: DateTime<Utc>) -> Self {
        Self {
            artist_id: None,
            venue_id: None,
            start_time: Some(now.format(DISPLAY_FORMAT).to_string()),
        }
    }

    /// Validates the submission. Whether the referenced artist and venue
    /// exist is checked at insert time.
    pub fn validated(self) -> Result<NewShow, FormErrors> {
        let mut errors = FormErrors::new();

        let artist_id = check_id(&mut errors, "artist_id", self.artist_id);
        let venue_id = check_id(&mut errors, "venue_id", self.venue_id);
        let start_time = match self.start_time.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add("start_time", REQUIRED);
                None
            }
            Some(raw) => {
                let parsed = parse_start_time(raw);
                if parsed.is_none() {
                    errors.add("start_time", "Not a valid datetime value.");
                }
                parsed
            }
        };

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => {
                Ok(NewShow {
                    artist_id,
                    venue_id,
                    start_time,
                })
            }
            _ => Err(errors),
        }
    }
}

impl NewShow {
    pub fn into_active_model(self) -> show::ActiveModel {
        show::ActiveModel {
            show_id: NotSet,
            start_time: Set(self.start_time),
            artist_id: Set(self.artist_id),
            venue_id: Set(self.venue_id),
        }
    }
}

fn check_id(errors: &mut FormErrors, field: &'static str, value: Option<i32>) -> Option<i32> {
    match value {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(id) if id < 1 => {
            errors.add(field, "Must be a positive id.");
            None
        }
        Some(id) => Some(id),
    }
}

/// Parses a start time and normalises it to UTC so stored values compare
/// chronologically.
pub fn parse_start_time(raw: &str) -> Option<DateTimeWithTimeZone> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc).fixed_offset());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}
