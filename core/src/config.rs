use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};
use color_eyre::eyre::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlServer {
    address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlDataDir {
    path: String,
    name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlConfig {
    #[serde(rename = "Server")]
    pub server: Option<TomlServer>,
    #[serde(rename = "DataDir")]
    pub data_dir: Option<TomlDataDir>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    pub path: PathBuf,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub address: String,
    pub port: u16,
    pub data_dir: DataDir,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: DEFAULT_ADDRESS.to_owned(),
            port: DEFAULT_PORT,
            data_dir: DataDir {
                path: DEFAULT_DATA_DIR.into(),
                name: None,
            },
        }
    }
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

/// Parses a config file. A relative data dir is resolved against `base_dir`.
pub fn parse_config(toml_str: &str, base_dir: &Path) -> Result<Config> {
    let toml_config: TomlConfig = toml::from_str(toml_str).context("Error parsing config file")?;
    let defaults = Config::default();
    let server = toml_config.server;
    let address = server
        .as_ref()
        .and_then(|s| s.address.clone())
        .unwrap_or(defaults.address);
    let port = server.as_ref().and_then(|s| s.port).unwrap_or(defaults.port);
    let data_dir = match toml_config.data_dir {
        Some(toml_value) => {
            let path = PathBuf::from(toml_value.path);
            DataDir {
                path: if path.is_relative() {
                    base_dir.join(path)
                } else {
                    path
                },
                name: toml_value.name,
            }
        }
        None => DataDir {
            path: base_dir.join(DEFAULT_DATA_DIR),
            name: None,
        },
    };
    Ok(Config {
        address,
        port,
        data_dir,
    })
}

pub async fn read_config(path: &Path) -> Result<Config> {
    let toml_str = tokio::fs::read_to_string(path)
        .await
        .context(format!("Error reading config file {}", path))?;
    let base_dir = path.parent().unwrap_or(Path::new("."));
    parse_config(&toml_str, base_dir)
}

#[cfg(test)]
mod tests {
    use claims::assert_err;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_full_config() {
        let config = parse_config(
            r#"
            [Server]
            address = "0.0.0.0"
            port = 8080

            [DataDir]
            path = "catalog"
            name = "main"
            "#,
            Path::new("/etc/quarkhub"),
        )
        .unwrap();
        assert_eq!(
            config,
            Config {
                address: "0.0.0.0".to_owned(),
                port: 8080,
                data_dir: DataDir {
                    path: "/etc/quarkhub/catalog".into(),
                    name: Some("main".to_owned()),
                },
            }
        );
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = parse_config("", Path::new("/srv")).unwrap();
        assert_eq!(config.address, DEFAULT_ADDRESS);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_dir.path, Path::new("/srv").join(DEFAULT_DATA_DIR));
    }

    #[test]
    fn absolute_data_dir_is_kept() {
        let config = parse_config("[DataDir]\npath = \"/var/lib/quarkhub\"", Path::new("/srv"))
            .unwrap();
        assert_eq!(config.data_dir.path, PathBuf::from("/var/lib/quarkhub"));
    }

    #[test]
    fn rejects_bad_port() {
        assert_err!(parse_config("[Server]\nport = 70000", Path::new(".")));
    }
}
