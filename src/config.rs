use anyhow::Result;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Values reported verbatim in every health report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    pub environment: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub health: HealthConfig,
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            health: HealthConfig {
                environment: "development".to_string(),
                message: "Service is healthy".to_string(),
            },
            cors: CorsConfig {
                allowed_origin: "http://localhost:3000".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from `healthgate.*` and `HEALTHGATE_*` environment variables.
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(File::with_name("healthgate").required(false))
            .add_source(
                Environment::with_prefix("HEALTHGATE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    /// Builder pre-populated with every default, so partial overrides are enough.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let d = AppConfig::default();
        let builder = Config::builder()
            .set_default("server.host", d.server.host)?
            .set_default("server.port", i64::from(d.server.port))?
            .set_default("logging.level", d.logging.level)?
            .set_default("health.environment", d.health.environment)?
            .set_default("health.message", d.health.message)?
            .set_default("cors.allowed_origin", d.cors.allowed_origin)?;
        Ok(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder.build()?.try_deserialize::<AppConfig>()?;
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
