pub mod client;
pub mod error;
pub mod types;

pub use client::MyMemoryClient;
pub use error::TranslateError;
