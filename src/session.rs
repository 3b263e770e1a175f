use crate::config::ServerConfig;
use crate::core_transfer::TransferType;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;

/// Where the next data connection comes from.
#[derive(Debug, Default)]
pub enum DataAddressing {
    /// Nothing usable: a passive listener was consumed, or the peer port gave no default.
    #[default]
    Unset,
    /// The server dials this endpoint (PORT/EPRT, or the RFC 959 default).
    Active(SocketAddr),
    /// The server accepts one connection on this listener (PASV/EPSV).
    Passive(TcpListener),
}

impl DataAddressing {
    /// RFC 959 default: the peer's host, one port below its control port.
    pub fn default_for_peer(peer: SocketAddr) -> Self {
        match peer.port().checked_sub(1) {
            Some(port) if port > 0 => DataAddressing::Active(SocketAddr::new(peer.ip(), port)),
            _ => DataAddressing::Unset,
        }
    }
}

/// Per-session settings taken from the server configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionSettings {
    pub pasv_address: Option<Ipv4Addr>,
    pub data_timeout: Option<Duration>,
    pub upload_buffer_size: usize,
    pub download_buffer_size: usize,
}

impl SessionSettings {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            // validated at startup
            pasv_address: config.pasv_ip().ok().flatten(),
            data_timeout: config.data_timeout(),
            upload_buffer_size: config.upload_buffer_size(),
            download_buffer_size: config.download_buffer_size(),
        }
    }
}

/// State of one control connection. Owned by the task driving that connection.
#[derive(Debug)]
pub struct Session {
    pub control_peer: SocketAddr,
    pub control_local: SocketAddr,
    pub username: Option<String>,
    pub is_authenticated: bool,
    pub transfer_type: TransferType,
    pub working_dir: PathBuf,
    pub data_addressing: DataAddressing,
    pub settings: SessionSettings,
}

impl Session {
    pub fn new(
        control_peer: SocketAddr,
        control_local: SocketAddr,
        working_dir: PathBuf,
        settings: SessionSettings,
    ) -> Self {
        Self {
            control_peer,
            control_local,
            username: None,
            is_authenticated: false, // Initialize as FALSE
            transfer_type: TransferType::Ascii,
            working_dir,
            data_addressing: DataAddressing::default_for_peer(control_peer),
            settings,
        }
    }

    /// Hands the current addressing to a transfer.
    ///
    /// A passive listener is moved out and never comes back; an active endpoint stays current.
    pub fn take_data_addressing(&mut self) -> DataAddressing {
        let addressing = std::mem::take(&mut self.data_addressing);
        if let DataAddressing::Active(addr) = addressing {
            self.data_addressing = DataAddressing::Active(addr);
        }
        addressing
    }

    pub fn set_active(&mut self, addr: SocketAddr) {
        self.data_addressing = DataAddressing::Active(addr);
    }

    pub fn set_passive(&mut self, listener: TcpListener) {
        self.data_addressing = DataAddressing::Passive(listener);
    }

    pub fn working_dir_display(&self) -> String {
        self.working_dir.to_string_lossy().to_string()
    }
}
