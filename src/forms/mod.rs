//! # Forms
//!
//! Typed submissions for venues, artists and shows. Each form is normalised
//! (trimmed, blank optionals dropped) and validated before anything touches
//! the database, then mapped field by field onto its entity.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use crate::error::{ApiError, validation_error};

pub mod artist;
pub mod show;
pub mod venue;

pub use artist::ArtistForm;
pub use show::{NewShow, ShowForm};
pub use venue::VenueForm;

const REQUIRED: &str = "This field is required.";
const MAX_GENRE_LEN: usize = 50;
const MAX_GENRES: usize = 20;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9][0-9 ().-]{5,18}[0-9]$").expect("phone pattern compiles")
});

/// Field-level validation failures, keyed by form field name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against `field`.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<FormErrors> for ApiError {
    fn from(errors: FormErrors) -> Self {
        validation_error("Validation failed", json!(errors.fields))
    }
}

/// Trims a required value.
fn clean_required(value: String) -> String {
    value.trim().to_string()
}

/// Trims an optional value, treating blank input as absent.
fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims genres, dropping blanks and repeats while keeping submission order.
fn clean_genres(genres: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(genres.len());
    let mut cleaned: Vec<String> = Vec::with_capacity(genres.len());
    for genre in genres {
        let genre = genre.trim().to_string();
        if !genre.is_empty() && seen.insert(genre.to_lowercase()) {
            cleaned.push(genre);
        }
    }
    cleaned
}

fn check_required(errors: &mut FormErrors, field: &'static str, value: &str, max_len: usize) {
    if value.is_empty() {
        errors.add(field, REQUIRED);
    } else {
        check_len(errors, field, value, max_len);
    }
}

fn check_len(errors: &mut FormErrors, field: &'static str, value: &str, max_len: usize) {
    if value.chars().count() > max_len {
        errors.add(
            field,
            format!("Field cannot be longer than {} characters.", max_len),
        );
    }
}

fn check_optional(errors: &mut FormErrors, field: &'static str, value: Option<&str>, max_len: usize) {
    if let Some(value) = value {
        check_len(errors, field, value, max_len);
    }
}

fn check_url(errors: &mut FormErrors, field: &'static str, value: Option<&str>, max_len: usize) {
    let Some(value) = value else {
        return;
    };

    check_len(errors, field, value, max_len);
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {}
        _ => errors.add(field, "Invalid URL."),
    }
}

fn check_phone(errors: &mut FormErrors, field: &'static str, value: Option<&str>, max_len: usize) {
    let Some(value) = value else {
        return;
    };

    check_len(errors, field, value, max_len);
    if !PHONE_PATTERN.is_match(value) {
        errors.add(field, "Invalid phone number.");
    }
}

fn check_genres(errors: &mut FormErrors, genres: &[String]) {
    if genres.len() > MAX_GENRES {
        errors.add(
            "genres",
            format!("Choose at most {} genres.", MAX_GENRES),
        );
    }
    if genres.iter().any(|g| g.chars().count() > MAX_GENRE_LEN) {
        errors.add(
            "genres",
            format!("Genres cannot be longer than {} characters.", MAX_GENRE_LEN),
        );
    }
}
