use crate::helpers::{expect_args, send_response};
use crate::session::Session;
use log::info;
use tokio::io::AsyncWrite;

/// Handles the USER FTP command.
///
/// Stores the user name and drops any earlier authentication; PASS must follow.
///
/// # Arguments
///
/// * `writer` - The control connection replies are written to.
/// * `session` - The client's session.
/// * `args` - The user name, as the only argument.
pub async fn handle_user_command<W>(
    writer: &mut W,
    session: &mut Session,
    args: &[&str],
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "USER", args, 1).await? {
        return Ok(());
    }

    let username = args[0];
    info!("Received USER command with username: {}", username);

    session.username = Some(username.to_string());
    session.is_authenticated = false;

    send_response(writer, b"331 User name ok, need password.\r\n").await
}
