//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>, env_var_name: &str) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        return Ok(PathBuf::from(path));
    }

    // Priority 3: TOML config file
    if let Some(value) = read_config_key("root_folder") {
        return Ok(PathBuf::from(value));
    }

    // Priority 4: OS-dependent compiled default
    Ok(get_default_root_folder())
}

/// Read one string key from the TOML config file, if present.
///
/// Missing file, unreadable file, or missing key all resolve to None so the
/// caller can fall through to the next priority level.
pub fn read_config_key(key: &str) -> Option<String> {
    let config_path = find_config_file().ok()?;
    let toml_content = std::fs::read_to_string(&config_path).ok()?;
    let config = toml::from_str::<toml::Value>(&toml_content).ok()?;
    config
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Get default configuration file path for the platform
fn find_config_file() -> Result<PathBuf> {
    let config_path = if cfg!(target_os = "linux") {
        // Try ~/.config/soulsync/config.toml first, then /etc/soulsync/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("soulsync").join("config.toml"));
        let system_config = PathBuf::from("/etc/soulsync/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    } else {
        dirs::config_dir()
            .map(|d| d.join("soulsync").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?
    };

    if config_path.exists() {
        Ok(config_path)
    } else {
        Err(Error::Config(format!(
            "Config file not found: {:?}",
            config_path
        )))
    }
}

/// Get OS-dependent default root folder path
fn get_default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("soulsync"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/soulsync"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("soulsync"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/soulsync"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("soulsync"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\soulsync"))
    } else {
        PathBuf::from("./soulsync_data")
    }
}

/// Read a setting from the database settings table
pub async fn get_setting(pool: &sqlx::SqlitePool, key: &str) -> Result<Option<String>> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(value)
}

/// Write a setting to the database settings table
pub async fn set_setting(pool: &sqlx::SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

/// Resolve a runtime setting with database > environment > TOML priority.
///
/// Used for values an operator may set in any of the three places, such as
/// the LLM API key. Returns None when no source defines it.
pub async fn resolve_setting(
    pool: &sqlx::SqlitePool,
    db_key: &str,
    env_var_name: &str,
) -> Result<Option<String>> {
    if let Some(value) = get_setting(pool, db_key).await? {
        if !value.is_empty() {
            return Ok(Some(value));
        }
    }

    if let Ok(value) = std::env::var(env_var_name) {
        if !value.is_empty() {
            return Ok(Some(value));
        }
    }

    Ok(read_config_key(db_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_arg_wins() {
        let path = resolve_root_folder(Some("/tmp/explicit"), "SOULSYNC_TEST_UNSET_VAR").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/explicit"));
    }

    #[test]
    fn test_env_var_beats_default() {
        std::env::set_var("SOULSYNC_TEST_ROOT_VAR", "/tmp/from-env");
        let path = resolve_root_folder(None, "SOULSYNC_TEST_ROOT_VAR").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/from-env"));
        std::env::remove_var("SOULSYNC_TEST_ROOT_VAR");
    }

    #[test]
    fn test_default_is_nonempty() {
        let path = get_default_root_folder();
        assert!(!path.as_os_str().is_empty());
    }
}
