use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;

pub struct Config {
    pub port: u16,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Page served at `/`.
    pub index_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let static_dir = std::env::var("PAIRCHAT_STATIC_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("static"));

        let index_path = std::env::var("PAIRCHAT_INDEX")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("index.html"));

        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            static_dir,
            index_path,
        }
    }
}
