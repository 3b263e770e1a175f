use crate::helpers::send_response;
use log::info;
use tokio::io::AsyncWrite;

/// Handles the QUIT FTP command.
///
/// Only sends the farewell; the caller ends the session, which closes the control connection.
pub async fn handle_quit_command<W>(writer: &mut W) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    info!("Received QUIT command. Closing connection.");
    send_response(
        writer,
        b"221 Service closing control connection. Logged out if appropriate.\r\n",
    )
    .await
}
