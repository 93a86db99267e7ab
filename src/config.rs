use crate::error::{Error, Result};
use crate::utils::prompt::CredentialPrompt;
use dotenvy::dotenv;
use std::env;
use std::fmt;
use std::sync::OnceLock;
use validator::Validate;

pub const DEFAULT_DJINNI_BASE_URL: &str = "https://djinni.co";
pub const DEFAULT_WORK_UA_BASE_URL: &str = "https://www.work.ua";
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "vacancy-scraper/0.1";
pub const DEFAULT_REGION_LIMIT: u32 = 1000;
pub const DEFAULT_PG_PORT: u16 = 5432;

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub user_agent: String,
    pub djinni_base_url: String,
    pub work_ua_base_url: String,
    pub nominatim_url: String,
    pub work_ua_max_pages: Option<u32>,
    pub work_ua_region_limit: u32,
    pub log_json: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            database: DatabaseConfig::from_env()?,
            user_agent: get_env_or("SCRAPER_USER_AGENT", DEFAULT_USER_AGENT),
            djinni_base_url: get_env_or("DJINNI_BASE_URL", DEFAULT_DJINNI_BASE_URL),
            work_ua_base_url: get_env_or("WORK_UA_BASE_URL", DEFAULT_WORK_UA_BASE_URL),
            nominatim_url: get_env_or("NOMINATIM_URL", DEFAULT_NOMINATIM_URL),
            work_ua_max_pages: get_env_parse_opt("WORK_UA_MAX_PAGES")?,
            work_ua_region_limit: get_env_parse_opt("WORK_UA_REGION_LIMIT")?
                .unwrap_or(DEFAULT_REGION_LIMIT),
            log_json: get_env_or("LOG_FORMAT", "text").eq_ignore_ascii_case("json"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            djinni_base_url: DEFAULT_DJINNI_BASE_URL.to_string(),
            work_ua_base_url: DEFAULT_WORK_UA_BASE_URL.to_string(),
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            work_ua_max_pages: None,
            work_ua_region_limit: DEFAULT_REGION_LIMIT,
            log_json: false,
        }
    }
}

/// Connection parameters as supplied; any of them may still be unset.
#[derive(Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: get_env_opt("DATABASE_URL"),
            host: get_env_opt("DB_HOST"),
            port: get_env_parse_opt("DB_PORT")?,
            database: get_env_opt("DB_NAME"),
            username: get_env_opt("DB_USER"),
            password: get_env_opt("DB_PASSWORD"),
        })
    }

    /// Fills every unset field through `prompt`. A configured `DATABASE_URL` wins and
    /// nothing is asked.
    pub fn resolve<P: CredentialPrompt + ?Sized>(&self, prompt: &P) -> Result<ConnectTarget> {
        if let Some(url) = &self.url {
            return Ok(ConnectTarget::Url(url.clone()));
        }

        let host = match &self.host {
            Some(host) => host.clone(),
            None => prompt.ask("Host")?,
        };
        let database = match &self.database {
            Some(database) => database.clone(),
            None => prompt.ask("Database")?,
        };
        let username = match &self.username {
            Some(username) => username.clone(),
            None => prompt.ask("Username")?,
        };
        let password = match &self.password {
            Some(password) => password.clone(),
            None => prompt.ask_secret("Password")?,
        };

        let settings = DatabaseSettings {
            host,
            port: self.port.unwrap_or(DEFAULT_PG_PORT),
            database,
            username,
            password,
        };
        settings.validate()?;
        Ok(ConnectTarget::Settings(settings))
    }
}

/// Fully specified connection parameters.
#[derive(Clone, Validate)]
pub struct DatabaseSettings {
    #[validate(length(min = 1))]
    pub host: String,
    pub port: u16,
    #[validate(length(min = 1))]
    pub database: String,
    #[validate(length(min = 1))]
    pub username: String,
    pub password: String,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum ConnectTarget {
    Url(String),
    Settings(DatabaseSettings),
}

fn get_env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn get_env_or(name: &str, default: &str) -> String {
    get_env_opt(name).unwrap_or_else(|| default.to_string())
}

fn get_env_parse_opt<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = get_env_opt(name) else {
        return Ok(None);
    };
    raw.parse()
        .map(Some)
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct ScriptedPrompt {
        asked: RefCell<Vec<String>>,
    }

    impl CredentialPrompt for ScriptedPrompt {
        fn ask(&self, label: &str) -> Result<String> {
            self.asked.borrow_mut().push(label.to_string());
            Ok(format!("{}-value", label.to_lowercase()))
        }

        fn ask_secret(&self, label: &str) -> Result<String> {
            self.asked.borrow_mut().push(label.to_string());
            Ok("secret".to_string())
        }
    }

    fn prompt() -> ScriptedPrompt {
        ScriptedPrompt {
            asked: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn url_skips_prompting() {
        let config = DatabaseConfig {
            url: Some("postgres://u:p@localhost/db".into()),
            ..Default::default()
        };
        let prompt = prompt();
        let target = config.resolve(&prompt).unwrap();
        assert!(matches!(target, ConnectTarget::Url(_)));
        assert!(prompt.asked.borrow().is_empty());
    }

    #[test]
    fn prompts_only_for_unset_fields() {
        let config = DatabaseConfig {
            host: Some("localhost".into()),
            username: Some("postgres".into()),
            ..Default::default()
        };
        let prompt = prompt();
        let target = config.resolve(&prompt).unwrap();
        assert_eq!(*prompt.asked.borrow(), vec!["Database", "Password"]);

        let ConnectTarget::Settings(settings) = target else {
            panic!("expected explicit settings");
        };
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, DEFAULT_PG_PORT);
        assert_eq!(settings.database, "database-value");
        assert_eq!(settings.password, "secret");
    }

    #[test]
    fn empty_required_field_is_rejected() {
        let config = DatabaseConfig {
            host: Some(String::new()),
            database: Some("jobs".into()),
            username: Some("postgres".into()),
            password: Some("pw".into()),
            ..Default::default()
        };
        let err = config.resolve(&prompt()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn debug_output_hides_password() {
        let config = DatabaseConfig {
            password: Some("hunter2".into()),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
