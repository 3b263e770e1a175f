use crate::core_ftpcommand::utils::resolve_dir;
use crate::helpers::{expect_args, send_reply, send_response};
use crate::session::Session;
use log::{info, warn};
use tokio::io::AsyncWrite;

/// Handles the CWD FTP command.
///
/// The working directory only changes when the target exists and is a directory.
pub async fn handle_cwd_command<W>(
    writer: &mut W,
    session: &mut Session,
    args: &[&str],
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "CWD", args, 1).await? {
        return Ok(());
    }

    let new_dir = resolve_dir(&session.working_dir, args[0]);

    match tokio::fs::metadata(&new_dir).await {
        Ok(metadata) if metadata.is_dir() => {
            session.working_dir = new_dir;
            info!("Directory successfully changed to: {}", session.working_dir_display());
            let text = format!("directory changed to {}.", session.working_dir_display());
            send_reply(writer, 200, &text).await
        }
        Ok(_) => {
            warn!("CWD: not a directory: {:?}", new_dir);
            send_response(writer, b"431 No such directory\r\n").await
        }
        Err(e) => {
            warn!("CWD: new working directory does not exist: {:?} ({})", new_dir, e);
            send_response(writer, b"431 No such directory\r\n").await
        }
    }
}
