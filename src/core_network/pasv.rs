use crate::constants::REPLY_LOCAL_ERROR;
use crate::helpers::{expect_args, send_response};
use crate::session::Session;
use log::{debug, error, info};
use std::net::{IpAddr, Ipv4Addr};
use tokio::io::AsyncWrite;
use tokio::net::TcpListener;

/// Handles the PASV FTP command.
///
/// Opens a listener on an ephemeral port of the control connection's local IPv4 address
/// and advertises it as `h1,h2,h3,h4,p1,p2`.
pub async fn handle_pasv_command<W>(
    writer: &mut W,
    session: &mut Session,
    args: &[&str],
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "PASV", args, 0).await? {
        return Ok(());
    }

    let local_ip = session.control_local.ip().to_canonical();
    let IpAddr::V4(local_v4) = local_ip else {
        error!("PASV: local address is not an IPv4 endpoint: {}", local_ip);
        return send_response(writer, REPLY_LOCAL_ERROR).await;
    };

    let (listener, port) = match setup_pasv_listener(local_ip).await {
        Ok(bound) => bound,
        Err(e) => {
            error!("PASV: unable to create listener: {}", e);
            return send_response(writer, REPLY_LOCAL_ERROR).await;
        }
    };

    let advertised = session.settings.pasv_address.unwrap_or(local_v4);
    let response = format_pasv_reply(advertised, port);
    session.set_passive(listener);

    info!("PASV listener ready for {} on port {}", session.control_peer, port);
    send_response(writer, response.as_bytes()).await
}

/// Handles the EPSV FTP command (RFC 2428). Only the port is advertised, so either IP family works.
pub async fn handle_epsv_command<W>(
    writer: &mut W,
    session: &mut Session,
    args: &[&str],
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "EPSV", args, 0).await? {
        return Ok(());
    }

    let local_ip = session.control_local.ip().to_canonical();
    let (listener, port) = match setup_pasv_listener(local_ip).await {
        Ok(bound) => bound,
        Err(e) => {
            error!("EPSV: unable to create listener: {}", e);
            return send_response(writer, REPLY_LOCAL_ERROR).await;
        }
    };
    session.set_passive(listener);

    info!("EPSV listener ready for {} on port {}", session.control_peer, port);
    let response = format!("229 Entering extended passive mode (|||{}|).\r\n", port);
    send_response(writer, response.as_bytes()).await
}

/// Binds a listener on an ephemeral port of `ip`. Returns it with the allocated port.
pub async fn setup_pasv_listener(ip: IpAddr) -> Result<(TcpListener, u16), std::io::Error> {
    let listener = TcpListener::bind((ip, 0)).await?;
    let port = listener.local_addr()?.port();
    debug!("Passive listener set up on IP: {}, Port: {}", ip, port);
    Ok((listener, port))
}

pub fn format_pasv_reply(ip: Ipv4Addr, port: u16) -> String {
    let [h1, h2, h3, h4] = ip.octets();
    format!(
        "227 Entering passive mode ({},{},{},{},{},{}).\r\n",
        h1,
        h2,
        h3,
        h4,
        port / 256,
        port % 256
    )
}
