//! Rejection sampling of random public repositories.
//!
//! Each row is drawn by picking a random `since` offset, taking the first
//! repository the listing returns and keeping it only when it is not a fork
//! and its primary language is one of the recognized columns.

use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, info};

use crate::error::{Result, SampleError};
use crate::features::{self, FeatureRow, LanguageMap};
use crate::getrepolist::RepoSource;
use crate::repolist::{RepoDetail, RepoSummary};
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct SamplerSettings {
    pub max_offset: u64,
    /// 0 means retry forever.
    pub max_attempts_per_row: u64,
    pub languages: LanguageMap,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            max_offset: 8_000_000,
            max_attempts_per_row: 1000,
            languages: LanguageMap::default(),
        }
    }
}

/// A repository that passed validation, with its committed row.
#[derive(Debug)]
pub struct AcceptedRow<'a> {
    pub index: usize,
    pub full_name: &'a str,
    pub language: &'a str,
    pub row: &'a FeatureRow,
}

enum Candidate {
    Rejected(&'static str),
    Accepted {
        summary: RepoSummary,
        detail: RepoDetail,
        column: usize,
    },
}

pub struct Sampler<S, R> {
    source: S,
    rng: R,
    settings: SamplerSettings,
    today: NaiveDate,
}

impl<S: RepoSource, R: Rng> Sampler<S, R> {
    pub fn new(source: S, rng: R, settings: SamplerSettings, today: NaiveDate) -> Self {
        Self {
            source,
            rng,
            settings,
            today,
        }
    }

    /// Collects exactly `n` rows. `on_accept` runs after each commit.
    pub fn sample<F>(&mut self, n: usize, mut on_accept: F) -> Result<Table>
    where
        F: FnMut(&AcceptedRow<'_>) -> Result<()>,
    {
        let mut table = Table::with_capacity(n);
        while !table.is_full() {
            let index = table.len();
            let (summary, detail, column) = self.find_candidate(index)?;
            let owner = self.source.user(&summary.owner.url)?;
            let row = features::build_row(column, &detail, &owner, self.today)?;
            table.commit(row)?;

            let language = detail.language.as_deref().unwrap_or_default();
            info!(
                index,
                full_name = %summary.full_name,
                language,
                watchers = detail.watchers_count,
                forks = detail.forks_count,
                "accepted repository"
            );
            on_accept(&AcceptedRow {
                index,
                full_name: &summary.full_name,
                language,
                row: &row,
            })?;
        }
        Ok(table)
    }

    #[cfg(test)]
    fn into_source(self) -> S {
        self.source
    }

    fn find_candidate(&mut self, index: usize) -> Result<(RepoSummary, RepoDetail, usize)> {
        let mut attempts = 0;
        loop {
            let limit = self.settings.max_attempts_per_row;
            if limit != 0 && attempts >= limit {
                return Err(SampleError::SamplingExhausted {
                    row: index,
                    attempts,
                });
            }
            attempts += 1;

            match self.draw()? {
                Candidate::Accepted {
                    summary,
                    detail,
                    column,
                } => return Ok((summary, detail, column)),
                Candidate::Rejected(reason) => {
                    debug!(index, attempts, reason, "rejected candidate");
                }
            }
        }
    }

    fn draw(&mut self) -> Result<Candidate> {
        let since = self.rng.random_range(0..self.settings.max_offset);
        let Some(summary) = self.source.list_repositories(since)?.into_iter().next() else {
            return Ok(Candidate::Rejected("empty listing"));
        };
        if summary.fork {
            return Ok(Candidate::Rejected("fork"));
        }
        let detail = match self.source.repository(&summary.url) {
            Ok(detail) => detail,
            // Deleted, moved away or blocked for legal reasons.
            Err(SampleError::GitHubApi {
                status: 404 | 410 | 451,
                ..
            }) => return Ok(Candidate::Rejected("detail unavailable")),
            Err(e) => return Err(e),
        };
        let Some(column) = detail
            .language
            .as_deref()
            .and_then(|language| self.settings.languages.column(language))
        else {
            return Ok(Candidate::Rejected("unrecognized language"));
        };
        Ok(Candidate::Accepted {
            summary,
            detail,
            column,
        })
    }
}
