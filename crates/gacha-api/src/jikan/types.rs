use serde::Deserialize;

use crate::traits::AnimeRecord;

// ── Envelopes ───────────────────────────────────────────────────

/// Single-item responses: `{ "data": T }`.
#[derive(Debug, Deserialize)]
pub struct JikanResponse<T> {
    pub data: T,
}

/// List responses: `{ "data": [T], "pagination": {...} }`.
#[derive(Debug, Deserialize)]
pub struct JikanListResponse<T> {
    pub data: Vec<T>,
    pub pagination: Option<JikanPagination>,
}

#[derive(Debug, Deserialize)]
pub struct JikanPagination {
    pub last_visible_page: Option<u32>,
    pub has_next_page: bool,
}

/// Jikan error body, e.g. `{ "status": 429, "type": "RateLimitException", "message": "..." }`.
#[derive(Debug, Deserialize)]
pub struct JikanErrorBody {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

// ── Anime ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JikanAnime {
    pub mal_id: u64,
    pub url: Option<String>,
    pub images: Option<JikanImages>,
    pub trailer: Option<JikanTrailer>,
    pub title: String,
    pub title_english: Option<String>,
    #[serde(rename = "type")]
    pub anime_type: Option<String>,
    pub episodes: Option<u32>,
    pub status: Option<String>,
    pub aired: Option<JikanAired>,
    pub score: Option<f32>,
    pub synopsis: Option<String>,
    pub year: Option<u32>,
    pub genres: Option<Vec<JikanGenre>>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImages {
    pub jpg: Option<JikanImageSet>,
    pub webp: Option<JikanImageSet>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImageSet {
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
}

impl JikanImageSet {
    fn best(self) -> Option<String> {
        self.large_image_url.or(self.image_url)
    }
}

#[derive(Debug, Deserialize)]
pub struct JikanTrailer {
    pub youtube_id: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanAired {
    pub from: Option<String>,
    pub string: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanGenre {
    pub mal_id: u64,
    pub name: String,
}

// ── Conversions ─────────────────────────────────────────────────

impl JikanAnime {
    pub fn into_record(self) -> AnimeRecord {
        let image_url = self.images.and_then(|images| {
            images
                .jpg
                .and_then(JikanImageSet::best)
                .or_else(|| images.webp.and_then(JikanImageSet::best))
        });
        let trailer_url = self.trailer.and_then(|t| {
            t.url.or_else(|| {
                t.youtube_id
                    .map(|id| format!("https://www.youtube.com/watch?v={id}"))
            })
        });
        // `year` is only set for seasonal entries; fall back to the airing start.
        let aired_year = self
            .aired
            .as_ref()
            .and_then(|a| a.from.as_deref())
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok());

        AnimeRecord {
            mal_id: self.mal_id,
            title: self.title,
            title_english: self.title_english,
            score: self.score,
            year: self.year.or(aired_year),
            episodes: self.episodes,
            status: self.status,
            genres: self
                .genres
                .map(|g| g.into_iter().map(|x| x.name).collect())
                .unwrap_or_default(),
            image_url,
            trailer_url,
            synopsis: self.synopsis.filter(|s| !s.trim().is_empty()),
            media_type: self.anime_type,
            aired: self.aired.and_then(|a| a.string),
            url: self.url,
        }
    }
}
