use std::env;
use std::path::PathBuf;

use cover_fetch::config::{read_config, Config};

use crate::{APP_DIR_NAME, CFG_FILE_NAME};

fn get_config_path() -> Option<PathBuf> {
    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    let cfg_path = dirs::config_dir()?.join(APP_DIR_NAME).join(CFG_FILE_NAME);
    if cfg_path.exists() {
        return Some(cfg_path);
    }

    None
}

/// Reads the configuration. Without a file anywhere, the defaults are used
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let Some(config_path) = cfg_path.or_else(get_config_path) else {
        println!("No configuration file found. Using defaults");
        return Ok(Config::default());
    };

    println!("Reading config from {}", config_path.display());
    let config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => return Err(e.to_string()),
    };

    match config.log {
        Some(ref log) => match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled. Using stdout"),
        },
        None => println!("Log disabled. Using stdout"),
    }

    Ok(config)
}
