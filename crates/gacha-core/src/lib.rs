pub mod config;
pub mod discover;
pub mod error;
pub mod fetch;
pub mod genre;
pub mod page;
pub mod render;
pub mod seasonal;
pub mod theme;
pub mod translate;
