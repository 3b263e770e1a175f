use crate::core_network::error::DataChannelError;
use crate::helpers::send_response;
use crate::session::{DataAddressing, Session};
use log::{debug, error, info};
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWrite;
use tokio::net::{TcpListener, TcpStream};

/// Opens the data connection for one transfer, using whatever addressing is current.
///
/// On failure the matching reply (425 or 451) has already been sent on the control
/// connection when this returns. A passive listener is consumed and closed either way.
pub async fn acquire_data_connection<W>(
    writer: &mut W,
    session: &mut Session,
) -> Result<TcpStream, DataChannelError>
where
    W: AsyncWrite + Unpin,
{
    let timeout = session.settings.data_timeout;

    let result = match session.take_data_addressing() {
        DataAddressing::Passive(listener) => accept_passive(listener, timeout).await,
        DataAddressing::Active(addr) => dial_active(addr, timeout).await,
        DataAddressing::Unset => Err(DataChannelError::NoEndpoint),
    };

    match result {
        Ok(stream) => Ok(stream),
        Err(e) => {
            error!(
                "Data connection for {} failed: {}",
                session.control_peer, e
            );
            if let Some(reply) = e.to_ftp_response() {
                send_response(writer, reply).await?;
            }
            Err(e)
        }
    }
}

/// Accepts exactly one connection, then drops the listener.
async fn accept_passive(
    listener: TcpListener,
    timeout: Option<Duration>,
) -> Result<TcpStream, DataChannelError> {
    let (stream, addr) = within(timeout, listener.accept())
        .await?
        .map_err(DataChannelError::Accept)?;
    debug!("Accepted passive data connection from: {}", addr);
    Ok(stream)
}

async fn dial_active(
    addr: SocketAddr,
    timeout: Option<Duration>,
) -> Result<TcpStream, DataChannelError> {
    let stream = within(timeout, TcpStream::connect(addr))
        .await?
        .map_err(|source| DataChannelError::Dial { addr, source })?;
    info!("Active data connection established with {}", addr);
    Ok(stream)
}

async fn within<F: Future>(
    limit: Option<Duration>,
    fut: F,
) -> Result<F::Output, DataChannelError> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| DataChannelError::Timeout),
        None => Ok(fut.await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::session_in;

    #[tokio::test]
    async fn test_passive_accepts_once_and_closes_listener() {
        let mut session = session_in("/tmp");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        session.set_passive(listener);

        let client = tokio::spawn(async move { TcpStream::connect(addr).await });
        let mut out = Vec::new();
        let stream = acquire_data_connection(&mut out, &mut session).await;
        assert!(stream.is_ok());
        assert!(client.await.unwrap().is_ok());
        assert!(out.is_empty());
        assert!(matches!(session.data_addressing, DataAddressing::Unset));

        // the listener is gone
        assert!(TcpStream::connect(addr).await.is_err());
    }

    #[tokio::test]
    async fn test_active_dials_endpoint() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let mut session = session_in("/tmp");
        session.set_active(addr);

        let mut out = Vec::new();
        let stream = acquire_data_connection(&mut out, &mut session).await;
        assert!(stream.is_ok());
        assert!(listener.accept().await.is_ok());
        assert!(matches!(session.data_addressing, DataAddressing::Active(a) if a == addr));
    }

    #[tokio::test]
    async fn test_active_dial_failure_replies_425() {
        // grab a free port, then close it
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let mut session = session_in("/tmp");
        session.set_active(addr);

        let mut out = Vec::new();
        let err = acquire_data_connection(&mut out, &mut session)
            .await
            .unwrap_err();
        assert!(matches!(err, DataChannelError::Dial { .. }));
        assert_eq!(out, b"425 Can't open data connection.\r\n");
        assert!(err.into_control_result().is_ok());
    }

    #[tokio::test]
    async fn test_unset_addressing_replies_451() {
        let mut session = session_in("/tmp");
        session.data_addressing = DataAddressing::Unset;

        let mut out = Vec::new();
        let err = acquire_data_connection(&mut out, &mut session)
            .await
            .unwrap_err();
        assert!(matches!(err, DataChannelError::NoEndpoint));
        assert!(out.starts_with(b"451 "));
    }

    #[tokio::test]
    async fn test_passive_timeout_replies_425() {
        let mut session = session_in("/tmp");
        session.settings.data_timeout = Some(Duration::from_millis(50));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        session.set_passive(listener);

        let mut out = Vec::new();
        let err = acquire_data_connection(&mut out, &mut session)
            .await
            .unwrap_err();
        assert!(matches!(err, DataChannelError::Timeout));
        assert_eq!(out, b"425 Can't open data connection.\r\n");
        assert!(TcpStream::connect(addr).await.is_err());
    }
}
