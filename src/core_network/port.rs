use crate::constants::{REPLY_COMMAND_OKAY, REPLY_SYNTAX_ERROR};
use crate::helpers::{expect_args, send_response};
use crate::session::Session;
use log::{info, warn};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::io::AsyncWrite;

/// Parses a PORT argument `h1,h2,h3,h4,p1,p2`.
///
/// Every field must be a decimal byte and the resulting port must not be 0.
pub fn parse_port_argument(arg: &str) -> Option<SocketAddr> {
    let parts: Vec<&str> = arg.split(',').collect();
    if parts.len() != 6 {
        return None;
    }

    let mut bytes = [0u8; 6];
    for (byte, part) in bytes.iter_mut().zip(&parts) {
        *byte = part.parse::<u8>().ok()?;
    }

    let port = u16::from(bytes[4]) * 256 + u16::from(bytes[5]);
    if port == 0 {
        return None;
    }

    let ip = Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]);
    Some(SocketAddr::new(IpAddr::V4(ip), port))
}

/// Parses an EPRT argument `<d>proto<d>address<d>port<d>` (RFC 2428).
///
/// The protocol field is not checked against the address family; resolving the
/// address decides. Host names are looked up.
pub async fn parse_eprt_argument(arg: &str) -> Option<SocketAddr> {
    let delimiter = arg.chars().next()?;
    let fields: Vec<&str> = arg.split(delimiter).collect();
    if fields.len() != 5 || !fields[0].is_empty() || !fields[4].is_empty() {
        return None;
    }

    let host = fields[2];
    let port = fields[3].parse::<u16>().ok()?;
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Some(SocketAddr::new(ip, port));
    }
    if host.is_empty() {
        return None;
    }

    tokio::net::lookup_host((host, port)).await.ok()?.next()
}

/// Handles the PORT (Active Mode) FTP command.
pub async fn handle_port_command<W>(
    writer: &mut W,
    session: &mut Session,
    args: &[&str],
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "PORT", args, 1).await? {
        return Ok(());
    }

    match parse_port_argument(args[0]) {
        Some(addr) => {
            info!("Received PORT command, data endpoint is now {}", addr);
            session.set_active(addr);
            send_response(writer, REPLY_COMMAND_OKAY).await
        }
        None => {
            warn!("PORT: invalid argument: {}", args[0]);
            send_response(writer, REPLY_SYNTAX_ERROR).await
        }
    }
}

/// Handles the EPRT (Extended Active Mode) FTP command.
pub async fn handle_eprt_command<W>(
    writer: &mut W,
    session: &mut Session,
    args: &[&str],
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "EPRT", args, 1).await? {
        return Ok(());
    }

    match parse_eprt_argument(args[0]).await {
        Some(addr) => {
            info!("Received EPRT command, data endpoint is now {}", addr);
            session.set_active(addr);
            send_response(writer, REPLY_COMMAND_OKAY).await
        }
        None => {
            warn!("EPRT: invalid argument: {}", args[0]);
            send_response(writer, REPLY_SYNTAX_ERROR).await
        }
    }
}
