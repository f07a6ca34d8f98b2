//! Currently airing and upcoming seasonal lists.

use chrono::{Datelike, NaiveDate, Utc};
use gacha_api::{AnimeRecord, SeasonalSource};

use crate::error::GachaError;
use crate::render::Renderer;

/// Anime season (quarter of the year).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimeSeason {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl AnimeSeason {
    /// Season containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        match date.month() {
            1..=3 => Self::Winter,
            4..=6 => Self::Spring,
            7..=9 => Self::Summer,
            _ => Self::Fall,
        }
    }

    /// Determine the current anime season from the current month.
    pub fn current() -> Self {
        Self::of(Utc::now().date_naive())
    }
}

impl std::fmt::Display for AnimeSeason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winter => write!(f, "Winter"),
            Self::Spring => write!(f, "Spring"),
            Self::Summer => write!(f, "Summer"),
            Self::Fall => write!(f, "Fall"),
        }
    }
}

/// "Airing now" heading with the season label, e.g. `Airing now · Fall 2026`.
pub fn airing_heading(today: NaiveDate) -> String {
    format!("Airing now · {} {}", AnimeSeason::of(today), today.year())
}

pub const UPCOMING_HEADING: &str = "Upcoming";

/// One list section. `records` is `None` when the request failed.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalList {
    pub heading: String,
    pub records: Option<Vec<AnimeRecord>>,
}

impl SeasonalList {
    pub fn render(&self, renderer: &Renderer) -> Result<String, GachaError> {
        match &self.records {
            Some(records) => renderer.render_season_list(&self.heading, records),
            None => renderer.render_load_error(&self.heading),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalPage {
    pub airing: SeasonalList,
    pub upcoming: SeasonalList,
}

impl SeasonalPage {
    /// Both sections, airing first.
    pub fn render(&self, renderer: &Renderer) -> Result<String, GachaError> {
        Ok(format!(
            "{}\n{}",
            self.airing.render(renderer)?,
            self.upcoming.render(renderer)?
        ))
    }
}

/// Fetch both lists. A failure in one list does not affect the other.
pub async fn load_seasonal<S: SeasonalSource>(source: &S, limit: u32) -> SeasonalPage {
    let (airing, upcoming) = tokio::join!(source.seasons_now(limit), source.seasons_upcoming(limit));

    let airing = airing
        .inspect_err(|e| tracing::warn!(error = %e, "failed to load airing list"))
        .ok();
    let upcoming = upcoming
        .inspect_err(|e| tracing::warn!(error = %e, "failed to load upcoming list"))
        .ok();

    SeasonalPage {
        airing: SeasonalList {
            heading: airing_heading(Utc::now().date_naive()),
            records: airing,
        },
        upcoming: SeasonalList {
            heading: UPCOMING_HEADING.to_string(),
            records: upcoming,
        },
    }
}
