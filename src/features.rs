//! Turns a repository's detail and owner profile into one numeric row.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{Result, SampleError};
use crate::repolist::{RepoDetail, UserProfile};

pub const LANGUAGE_COLUMNS: usize = 7;
pub const ROW_WIDTH: usize = LANGUAGE_COLUMNS + 6;

pub const AGE_DAYS: usize = 7;
pub const HAS_WIKI: usize = 8;
pub const FOLLOWING: usize = 9;
pub const FOLLOWERS: usize = 10;
pub const WATCHERS: usize = 11;
pub const FORKS: usize = 12;

pub type FeatureRow = [u64; ROW_WIDTH];

/// Maps recognized primary languages to their one-hot column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMap {
    names: Vec<String>,
}

impl LanguageMap {
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.len() != LANGUAGE_COLUMNS {
            return Err(SampleError::Config(format!(
                "expected {} languages, got {}",
                LANGUAGE_COLUMNS,
                names.len()
            )));
        }
        let mut seen = HashSet::new();
        for name in &names {
            if name.is_empty() {
                return Err(SampleError::Config("language names cannot be empty".into()));
            }
            if !seen.insert(name.as_str()) {
                return Err(SampleError::Config(format!("duplicate language {name:?}")));
            }
        }
        Ok(Self { names })
    }

    pub fn column(&self, language: &str) -> Option<usize> {
        self.names.iter().position(|name| name == language)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for LanguageMap {
    fn default() -> Self {
        Self {
            names: ["Python", "JavaScript", "Ruby", "Java", "Shell", "PHP", "R"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Whole days between the date part of `created_at` and `today`.
/// Creation dates after `today` count as zero.
pub fn age_in_days(created_at: &str, today: NaiveDate) -> Result<u64> {
    let invalid = || SampleError::InvalidDate {
        value: created_at.to_string(),
    };
    let date = created_at.get(..10).ok_or_else(invalid)?;
    let created = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
    Ok(u64::try_from((today - created).num_days()).unwrap_or(0))
}

pub fn build_row(
    column: usize,
    detail: &RepoDetail,
    owner: &UserProfile,
    today: NaiveDate,
) -> Result<FeatureRow> {
    let mut row = [0; ROW_WIDTH];
    row[column] = 1;
    row[AGE_DAYS] = age_in_days(&detail.created_at, today)?;
    row[HAS_WIKI] = u64::from(detail.has_wiki);
    row[FOLLOWING] = owner.following;
    row[FOLLOWERS] = owner.followers;
    row[WATCHERS] = detail.watchers_count;
    row[FORKS] = detail.forks_count;
    Ok(row)
}
