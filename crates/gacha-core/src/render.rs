//! HTML fragments for the anime card and the seasonal lists.
//!
//! Every optional field is replaced by placeholder text before it reaches the
//! template, so the templates never branch on missing data except for links
//! and images.

use gacha_api::AnimeRecord;
use minijinja::{context, Environment};
use serde::Serialize;

use crate::error::GachaError;
use crate::genre::GenreFilter;
use crate::page::PageState;
use crate::theme::Theme;

pub const NO_SCORE: &str = "N/A";
pub const NO_EPISODES: &str = "?";
pub const NO_VALUE: &str = "—";
pub const NO_SYNOPSIS: &str = "No synopsis available.";

/// Display-ready fields of the random anime card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub mal_id: u64,
    pub title: String,
    pub title_english: Option<String>,
    pub image_url: Option<String>,
    pub score: String,
    pub episodes: String,
    pub year: String,
    pub status: String,
    pub aired: String,
    pub genres: String,
    pub synopsis: String,
    pub trailer_url: Option<String>,
    pub url: Option<String>,
}

impl CardView {
    /// `synopsis` is the (possibly translated) text to show instead of the record's own.
    pub fn new(anime: &AnimeRecord, synopsis: Option<&str>) -> Self {
        Self {
            mal_id: anime.mal_id,
            title: anime.title.clone(),
            title_english: anime
                .title_english
                .clone()
                .filter(|t| !t.is_empty() && *t != anime.title),
            image_url: anime.image_url.clone(),
            score: score_text(anime.score),
            episodes: episodes_text(anime.episodes),
            year: anime.year.map(|y| y.to_string()).unwrap_or_default(),
            status: anime.status.clone().unwrap_or_else(|| NO_VALUE.to_string()),
            aired: anime.aired.clone().unwrap_or_else(|| NO_VALUE.to_string()),
            genres: if anime.genres.is_empty() {
                NO_VALUE.to_string()
            } else {
                anime.genres.join(", ")
            },
            synopsis: synopsis
                .or(anime.synopsis.as_deref())
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(NO_SYNOPSIS)
                .to_string(),
            trailer_url: anime.trailer_url.clone(),
            url: anime.url.clone(),
        }
    }
}

/// Display-ready fields of a seasonal summary card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonCardView {
    pub mal_id: u64,
    pub title: String,
    pub image_url: Option<String>,
    pub score: String,
    pub episodes: String,
    pub aired: String,
}

impl From<&AnimeRecord> for SeasonCardView {
    fn from(anime: &AnimeRecord) -> Self {
        Self {
            mal_id: anime.mal_id,
            title: anime.title.clone(),
            image_url: anime.image_url.clone(),
            score: score_text(anime.score),
            episodes: episodes_text(anime.episodes),
            aired: anime.aired.clone().unwrap_or_else(|| NO_VALUE.to_string()),
        }
    }
}

fn score_text(score: Option<f32>) -> String {
    score
        .filter(|s| *s > 0.0)
        .map(|s| s.to_string())
        .unwrap_or_else(|| NO_SCORE.to_string())
}

fn episodes_text(episodes: Option<u32>) -> String {
    episodes
        .filter(|e| *e > 0)
        .map(|e| e.to_string())
        .unwrap_or_else(|| NO_EPISODES.to_string())
}

/// Template environment holding the embedded HTML templates.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, GachaError> {
        let mut env = Environment::new();
        env.add_template("card.html", include_str!("../templates/card.html"))?;
        env.add_template("not_found.html", include_str!("../templates/not_found.html"))?;
        env.add_template("season_list.html", include_str!("../templates/season_list.html"))?;
        env.add_template("load_error.html", include_str!("../templates/load_error.html"))?;
        env.add_template("page.html", include_str!("../templates/page.html"))?;
        Ok(Self { env })
    }

    /// The random anime card.
    pub fn render_card(
        &self,
        anime: &AnimeRecord,
        synopsis: Option<&str>,
    ) -> Result<String, GachaError> {
        let card = CardView::new(anime, synopsis);
        Ok(self
            .env
            .get_template("card.html")?
            .render(context! { card => card })?)
    }

    /// Message shown when the search came back empty.
    pub fn render_not_found(&self, filter: &GenreFilter) -> Result<String, GachaError> {
        Ok(self
            .env
            .get_template("not_found.html")?
            .render(context! { genre => filter.as_str() })?)
    }

    /// A seasonal list section with one summary card per record.
    pub fn render_season_list(
        &self,
        heading: &str,
        records: &[AnimeRecord],
    ) -> Result<String, GachaError> {
        let cards: Vec<SeasonCardView> = records.iter().map(SeasonCardView::from).collect();
        Ok(self
            .env
            .get_template("season_list.html")?
            .render(context! { heading => heading, cards => cards })?)
    }

    /// Placeholder section for a seasonal list that failed to load.
    pub fn render_load_error(&self, heading: &str) -> Result<String, GachaError> {
        Ok(self
            .env
            .get_template("load_error.html")?
            .render(context! { heading => heading })?)
    }

    /// Wrap a fragment in a minimal document reflecting the theme and menu state.
    pub fn render_page(
        &self,
        title: &str,
        theme: Theme,
        page: &PageState,
        body: &str,
    ) -> Result<String, GachaError> {
        Ok(self.env.get_template("page.html")?.render(context! {
            title => title,
            theme => theme.as_str(),
            icon => theme.icon(),
            menu_open => page.menu_open(),
            body => body,
        })?)
    }
}
