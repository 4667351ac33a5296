use serde::Deserialize;

/// Which record store backs credentials and watchlists
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Line-oriented text files (`creds.txt`, `<username>.txt`)
    File,
    /// Embedded sled database
    Sled,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// IMDb-API key
    pub imdb_api_key: String,

    /// IMDb-API base URL
    #[serde(default = "default_imdb_api_url")]
    pub imdb_api_url: String,

    /// Poster shown when a movie has no image
    #[serde(default = "default_placeholder_poster_url")]
    pub placeholder_poster_url: String,

    /// Directory holding the record store
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Record store backend
    #[serde(default = "default_store_backend")]
    pub store_backend: StoreBackend,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_imdb_api_url() -> String {
    "https://imdb-api.com".to_string()
}

pub fn default_placeholder_poster_url() -> String {
    "https://imdb-api.com/images/original/nopicture.jpg".to_string()
}

fn default_data_dir() -> String {
    "database".to_string()
}

fn default_store_backend() -> StoreBackend {
    StoreBackend::File
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
