use crate::constants::{
    DEFAULT_BUFFER_SIZE, DEFAULT_LISTEN_ADDRESS, DEFAULT_LISTEN_PORT, DEFAULT_ROOT_DIR,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid listen port: {0}")]
    InvalidPort(u16),

    #[error("Invalid listen address: {0}")]
    InvalidListenAddress(String),

    #[error("Invalid PASV address (expected an IPv4 address): {0}")]
    InvalidPasvAddress(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: String,
    pub listen_port: u16,
    pub root_dir: String,
    pub pasv_address: Option<String>, // Public IPv4 advertised in PASV replies
    pub data_timeout_secs: Option<u64>, // None blocks until the peer shows up
    pub upload_buffer_size: Option<usize>,
    pub download_buffer_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: String::from(DEFAULT_LISTEN_ADDRESS),
            listen_port: DEFAULT_LISTEN_PORT,
            root_dir: String::from(DEFAULT_ROOT_DIR),
            pasv_address: None,
            data_timeout_secs: None,
            upload_buffer_size: Some(DEFAULT_BUFFER_SIZE),
            download_buffer_size: Some(DEFAULT_BUFFER_SIZE),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))?;
        Ok(config)
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.listen_port == 0 {
            return Err(ConfigError::InvalidPort(0));
        }
        self.server.listen_socket_addr()?;
        self.server.pasv_ip()?;
        Ok(())
    }
}

impl ServerConfig {
    pub fn listen_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .listen_address
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidListenAddress(self.listen_address.clone()))?;
        Ok(SocketAddr::new(ip, self.listen_port))
    }

    pub fn pasv_ip(&self) -> Result<Option<Ipv4Addr>, ConfigError> {
        match &self.pasv_address {
            Some(addr) => addr
                .parse::<Ipv4Addr>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidPasvAddress(addr.clone())),
            None => Ok(None),
        }
    }

    pub fn data_timeout(&self) -> Option<Duration> {
        self.data_timeout_secs.map(Duration::from_secs)
    }

    pub fn upload_buffer_size(&self) -> usize {
        self.upload_buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE).max(1)
    }

    pub fn download_buffer_size(&self) -> usize {
        self.download_buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE).max(1)
    }
}
