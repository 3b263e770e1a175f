// Errors raised while setting up a data connection
use crate::constants::{REPLY_CANT_OPEN_DATA, REPLY_LOCAL_ERROR};
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataChannelError {
    #[error("no data endpoint available")]
    NoEndpoint,

    #[error("unable to accept incoming data connection: {0}")]
    Accept(#[source] std::io::Error),

    #[error("unable to establish data connection to {addr}: {source}")]
    Dial {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out waiting for the data connection")]
    Timeout,

    #[error("control connection failed: {0}")]
    Control(#[from] std::io::Error),
}

impl DataChannelError {
    /// The reply sent on the control connection, if one can still be sent.
    pub fn to_ftp_response(&self) -> Option<&'static [u8]> {
        match self {
            DataChannelError::NoEndpoint => Some(REPLY_LOCAL_ERROR),
            DataChannelError::Accept(_)
            | DataChannelError::Dial { .. }
            | DataChannelError::Timeout => Some(REPLY_CANT_OPEN_DATA),
            DataChannelError::Control(_) => None,
        }
    }

    /// What the command handler returns once the failure has been reported.
    ///
    /// Only a broken control connection ends the session.
    pub fn into_control_result(self) -> Result<(), std::io::Error> {
        match self {
            DataChannelError::Control(e) => Err(e),
            _ => Ok(()),
        }
    }
}
