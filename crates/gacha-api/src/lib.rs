pub mod jikan;
pub mod traits;
pub mod translate;

pub use jikan::{JikanClient, JikanError};
pub use traits::{AnimeRecord, RandomAnimeSource, SeasonalSource, ServiceError, Translator};
pub use translate::{MyMemoryClient, TranslateError};
