use crate::helpers::{expect_args, send_response};
use crate::session::Session;
use log::{info, warn};
use tokio::io::AsyncWrite;

/// Handles the PASS FTP command.
///
/// Any password is accepted once a user name is known; there is no account store.
pub async fn handle_pass_command<W>(
    writer: &mut W,
    session: &mut Session,
    args: &[&str],
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "PASS", args, 1).await? {
        return Ok(());
    }

    let Some(username) = session.username.as_deref() else {
        warn!("PASS received before USER from {}", session.control_peer);
        return send_response(writer, b"332 Need account for login.\r\n").await;
    };

    info!("User {} logged in from {}", username, session.control_peer);
    session.is_authenticated = true;

    send_response(writer, b"230 User logged in, proceed.\r\n").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_ftpcommand::user::handle_user_command;
    use crate::session::test_support::session_in;

    #[tokio::test]
    async fn test_pass_without_user() {
        let mut session = session_in("/tmp");
        let mut out = Vec::new();
        handle_pass_command(&mut out, &mut session, &["secret"]).await.unwrap();
        assert_eq!(out, b"332 Need account for login.\r\n");
        assert!(!session.is_authenticated);
    }

    #[tokio::test]
    async fn test_user_then_pass() {
        let mut session = session_in("/tmp");
        let mut out = Vec::new();
        handle_user_command(&mut out, &mut session, &["anonymous"]).await.unwrap();
        out.clear();
        handle_pass_command(&mut out, &mut session, &["x"]).await.unwrap();
        assert_eq!(out, b"230 User logged in, proceed.\r\n");
        assert!(session.is_authenticated);

        // a new USER starts over
        out.clear();
        handle_user_command(&mut out, &mut session, &["other"]).await.unwrap();
        assert!(!session.is_authenticated);
    }

    #[tokio::test]
    async fn test_pass_argument_count() {
        let mut session = session_in("/tmp");
        session.username = Some("bob".to_string());
        let mut out = Vec::new();
        handle_pass_command(&mut out, &mut session, &[]).await.unwrap();
        assert!(out.starts_with(b"501 "));
        assert!(!session.is_authenticated);
    }
}
