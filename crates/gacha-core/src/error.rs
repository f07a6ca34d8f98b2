use thiserror::Error;

#[derive(Debug, Error)]
pub enum GachaError {
    #[error("config error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
