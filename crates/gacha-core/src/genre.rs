//! Genre filter and match semantics for the random anime search.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Genres offered as quick-pick chips. Names match Jikan's `genres[].name`.
pub const GENRE_CHIPS: &[&str] = &[
    "Action",
    "Adventure",
    "Comedy",
    "Drama",
    "Fantasy",
    "Horror",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Slice of Life",
    "Sports",
    "Supernatural",
];

/// How a genre filter is compared against a record's genre names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive equality.
    #[default]
    Exact,
    /// Case-insensitive equality or containment (`"sci"` matches `"Sci-Fi"`).
    Substring,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "substring" => Ok(Self::Substring),
            other => Err(format!("unknown match mode '{other}' (expected exact or substring)")),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Substring => write!(f, "substring"),
        }
    }
}

/// A single selected genre, or no filter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreFilter {
    selected: Option<Selected>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selected {
    display: String,
    key: String,
}

impl GenreFilter {
    /// No filter: any genre qualifies.
    pub fn any() -> Self {
        Self::default()
    }

    /// Build a filter from user input. Blank input means no filter.
    pub fn new(genre: &str) -> Self {
        let display = genre.trim();
        if display.is_empty() {
            return Self::any();
        }
        Self {
            selected: Some(Selected {
                display: display.to_string(),
                key: fold(display),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// The genre as the user typed it (trimmed), if any.
    pub fn as_str(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.display.as_str())
    }

    /// Whether any of `genres` satisfies this filter. An empty filter always matches;
    /// a non-empty filter never matches an empty genre list.
    pub fn matches<S: AsRef<str>>(&self, genres: &[S], mode: MatchMode) -> bool {
        let Some(selected) = &self.selected else {
            return true;
        };
        genres.iter().any(|genre| {
            let genre = fold(genre.as_ref());
            match mode {
                MatchMode::Exact => genre == selected.key,
                MatchMode::Substring => genre.contains(&selected.key),
            }
        })
    }
}

impl From<Option<&str>> for GenreFilter {
    fn from(genre: Option<&str>) -> Self {
        genre.map(Self::new).unwrap_or_default()
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or(""))
    }
}

/// NFKC + lowercase, so fullwidth or differently-cased input compares equal.
fn fold(s: &str) -> String {
    s.trim().nfkc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_no_filter() {
        assert!(GenreFilter::new("").is_empty());
        assert!(GenreFilter::new("   ").is_empty());
        assert!(GenreFilter::from(None).is_empty());
    }

    #[test]
    fn test_empty_filter_matches_anything() {
        let filter = GenreFilter::any();
        assert!(filter.matches::<&str>(&[], MatchMode::Exact));
        assert!(filter.matches(&["Drama"], MatchMode::Exact));
    }

    #[test]
    fn test_exact_is_case_insensitive() {
        let filter = GenreFilter::new("horror");
        assert!(filter.matches(&["Action", "Horror"], MatchMode::Exact));
        assert!(!filter.matches(&["Action"], MatchMode::Exact));
    }

    #[test]
    fn test_exact_rejects_partial_name() {
        let filter = GenreFilter::new("sci");
        assert!(!filter.matches(&["Sci-Fi"], MatchMode::Exact));
        assert!(filter.matches(&["Sci-Fi"], MatchMode::Substring));
    }

    #[test]
    fn test_substring_still_accepts_exact() {
        let filter = GenreFilter::new("Action");
        assert!(filter.matches(&["action"], MatchMode::Substring));
    }

    #[test]
    fn test_non_empty_filter_rejects_no_genres() {
        let filter = GenreFilter::new("Action");
        assert!(!filter.matches::<String>(&[], MatchMode::Substring));
    }

    #[test]
    fn test_fullwidth_input_folds() {
        let filter = GenreFilter::new("ＡＣＴＩＯＮ");
        assert!(filter.matches(&["Action"], MatchMode::Exact));
    }

    #[test]
    fn test_display_keeps_user_spelling() {
        assert_eq!(GenreFilter::new("  Slice of Life ").to_string(), "Slice of Life");
    }

    #[test]
    fn test_match_mode_from_str() {
        assert_eq!("EXACT".parse::<MatchMode>(), Ok(MatchMode::Exact));
        assert_eq!("substring".parse::<MatchMode>(), Ok(MatchMode::Substring));
        assert!("fuzzy".parse::<MatchMode>().is_err());
    }
}
