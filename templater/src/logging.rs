use std::path::PathBuf;

const APP_NAME: &str = "templater";
const LOG_FILE_NAME: &str = "templater.log";

/// Environment variable overriding the log level
pub const LOG_ENV_VAR: &str = "TEMPLATER_LOG";
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Warn;

pub fn cache_dir() -> PathBuf {
    #[cfg(unix)]
    {
        if let Ok(xdg_cache_home) = std::env::var("XDG_CACHE_HOME")
            && !xdg_cache_home.is_empty()
        {
            return PathBuf::from(xdg_cache_home).join(APP_NAME);
        }
        dirs::home_dir()
            .map_or_else(std::env::temp_dir, |home| home.join(".cache"))
            .join(APP_NAME)
    }
    #[cfg(windows)]
    {
        if let Some(cache) = dirs::cache_dir() {
            cache.join(APP_NAME)
        } else {
            std::env::temp_dir().join(APP_NAME)
        }
    }
}

pub fn default_log_file() -> PathBuf {
    cache_dir().join(LOG_FILE_NAME)
}

/// Level from `TEMPLATER_LOG`, or the default when unset or unparseable.
pub fn level_from_env(value: Option<&str>) -> log::LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

pub fn setup_logging(level: log::LevelFilter) -> anyhow::Result<()> {
    let log_file = default_log_file();
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    simple_log::file(log_file.to_string_lossy().into_owned(), level, 10, 10)
        .map_err(|e| anyhow::anyhow!(e))?;
    log::info!("templater logging initialised (level={level})");
    Ok(())
}
