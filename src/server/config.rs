use crate::server::error::config::ConfigError;

pub static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Initial superuser created on startup when no user with that name exists
pub struct InitialAdmin {
    pub username: String,
    pub password: String,
}

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub bind_address: String,
    pub initial_admin: Option<InitialAdmin>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let initial_admin = match (
            optional_var("INITIAL_ADMIN_USERNAME"),
            optional_var("INITIAL_ADMIN_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some(InitialAdmin { username, password }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar(
                    "INITIAL_ADMIN_PASSWORD".to_string(),
                ))
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar(
                    "INITIAL_ADMIN_USERNAME".to_string(),
                ))
            }
        };

        let bind_address =
            optional_var("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        if bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::InvalidEnvValue {
                var: "BIND_ADDRESS".to_string(),
                reason: format!("{bind_address:?} is not a socket address"),
            });
        }

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            valkey_url: required_var("VALKEY_URL")?,
            bind_address,
            initial_admin,
        })
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    optional_var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Unset and blank variables are both treated as absent
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
