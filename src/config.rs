use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
    pub max_connections: u32,
    pub create_if_missing: bool,
}

/// Knobs the HTTP handlers read on every request.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub questions_per_page: usize,
    /// Highest category id accepted by the category and quiz endpoints.
    pub max_category_id: i64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            questions_per_page: 10,
            max_category_id: 6,
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Settings {
    /// Reads `.env`, then an optional `trivia.toml` (or the file named by `TRIVIA_CONFIG`),
    /// then `TRIVIA__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let file = dotenv::var("TRIVIA_CONFIG").unwrap_or_else(|_| "trivia".to_owned());
        let builder = Self::defaults()?
            .add_source(File::with_name(&file).required(false))
            .add_source(
                Environment::with_prefix("TRIVIA")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let api = ApiSettings::default();
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.path", "trivia.db")?
            .set_default("database.max_connections", 5)?
            .set_default("database.create_if_missing", true)?
            .set_default("api.questions_per_page", api.questions_per_page as i64)?
            .set_default("api.max_category_id", api.max_category_id)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        if settings.api.questions_per_page == 0 {
            return Err(ConfigError::Message(
                "api.questions_per_page must be greater than zero".to_owned(),
            ));
        }
        if settings.api.max_category_id < 1 {
            return Err(ConfigError::Message(
                "api.max_category_id must be at least 1".to_owned(),
            ));
        }
        Ok(settings)
    }
}
