use crate::error::Error;

/// Browser origins allowed to call the API when `CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://out-flo-assignment-kappa.vercel.app",
    "http://localhost:5173",
    "http://localhost:3000",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    MongoDb,
    Memory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RapidApiConfig {
    pub api_key: Option<String>,
    pub host: String,
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
    pub cors_origins: Vec<String>,
    pub storage: StorageBackend,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub gemini: GeminiConfig,
    pub rapid_api: RapidApiConfig,
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Unset and empty
    /// variables both fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Error>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let var = |name: &'static str| lookup(name).filter(|value| !value.is_empty());
        let var_or =
            |name: &'static str, default: &str| var(name).unwrap_or_else(|| default.to_string());

        let port = match var("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| Error::InvalidConfiguration { name: "PORT", value })?,
            None => 3000,
        };

        let storage = match var("STORAGE").as_deref() {
            None | Some("mongodb") => StorageBackend::MongoDb,
            Some("memory") => StorageBackend::Memory,
            Some(value) => {
                return Err(Error::InvalidConfiguration {
                    name: "STORAGE",
                    value: value.to_string(),
                })
            }
        };

        Ok(Config {
            host: var_or("HOST", "127.0.0.1"),
            port,
            api_prefix: var("API_PREFIX")
                .map(|prefix| prefix.trim_end_matches('/').to_string())
                .unwrap_or_default(),
            cors_origins: match var("CORS_ORIGINS") {
                Some(origins) => origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            },
            storage,
            mongodb_uri: var_or("MONGODB_URI", "mongodb://localhost:27017"),
            mongodb_database: var_or("MONGODB_DATABASE", "outflo"),
            gemini: GeminiConfig {
                api_key: var("GEMINI_API_KEY"),
                model: var_or("GEMINI_MODEL", "gemini-1.5-flash"),
                base_url: var_or(
                    "GEMINI_BASE_URL",
                    "https://generativelanguage.googleapis.com",
                ),
            },
            rapid_api: RapidApiConfig {
                api_key: var("RAPID_API_KEY"),
                host: var_or("RAPID_API_HOST", "linkedin-data-api.p.rapidapi.com"),
                base_url: var_or(
                    "RAPID_API_BASE_URL",
                    "https://linkedin-data-api.p.rapidapi.com",
                ),
            },
        })
    }
}
