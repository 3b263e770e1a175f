use crate::constants::{REPLY_COMMAND_OKAY, REPLY_PARAMETER_NOT_IMPLEMENTED, REPLY_SYNTAX_ERROR};
use crate::helpers::{expect_args, send_response};
use log::warn;
use tokio::io::AsyncWrite;

/// Handles the STRU FTP command. Only File structure is supported.
pub async fn handle_stru_command<W>(writer: &mut W, args: &[&str]) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "STRU", args, 1).await? {
        return Ok(());
    }

    let response = match args[0].to_ascii_uppercase().as_str() {
        "F" => REPLY_COMMAND_OKAY,
        "R" | "P" => REPLY_PARAMETER_NOT_IMPLEMENTED,
        other => {
            warn!("STRU: unknown structure: {}", other);
            REPLY_SYNTAX_ERROR
        }
    };
    send_response(writer, response).await
}
