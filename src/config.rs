use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};

use serde::Deserialize;

const CONFIG_DIR_VAR: &str = "${config_dir}";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub images_dir: PathBuf,
    /// Prefix of the image path written in the front matter, as seen by the site
    pub image_url_prefix: String,
    pub post_extension: String,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            content_dir: PathBuf::from("content/literature"),
            images_dir: PathBuf::from("static/images/instagram"),
            image_url_prefix: "/images/instagram".to_string(),
            post_extension: "md".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Embed {
    /// Name of the shortcode, e.g. `instagram` for `{{< instagram ID >}}`
    pub shortcode: String,
    /// Page URL template. `{id}` is replaced by the embedded post id
    pub page_url: String,
}

impl Default for Embed {
    fn default() -> Self {
        Embed {
            shortcode: "instagram".to_string(),
            page_url: "https://www.instagram.com/p/{id}/".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Fetch {
    pub user_agent: String,
    pub page_timeout_secs: u64,
    pub image_timeout_secs: u64,
    pub delay_secs: u64,
    pub image_extension: String,
}

impl Default for Fetch {
    fn default() -> Self {
        Fetch {
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36".to_string(),
            page_timeout_secs: 10,
            image_timeout_secs: 30,
            delay_secs: 2,
            image_extension: "jpg".to_string(),
        }
    }
}

impl Fetch {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub embed: Embed,
    pub fetch: Fetch,
    pub log: Option<Log>,
}

/// Replaces `${config_dir}` with the directory holding the configuration file
fn expand_path(path: PathBuf, config_dir: &Path) -> PathBuf {
    match path.strip_prefix(CONFIG_DIR_VAR) {
        Ok(rest) => config_dir.join(rest),
        Err(_) => path,
    }
}

pub fn parse_config(cfg_content: &str, config_dir: &Path) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths.content_dir = expand_path(cfg.paths.content_dir, config_dir);
    cfg.paths.images_dir = expand_path(cfg.paths.images_dir, config_dir);
    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(|l| expand_path(l, config_dir));
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let config_dir = cfg_path.parent().unwrap_or_else(|| Path::new("."));
    parse_config(&cfg_content, config_dir)
}
