use crate::constants::{REPLY_COMMAND_OKAY, REPLY_PARAMETER_NOT_IMPLEMENTED, REPLY_SYNTAX_ERROR};
use crate::helpers::{expect_args, send_response};
use log::warn;
use tokio::io::AsyncWrite;

/// Handles the MODE FTP command. Only Stream mode is supported.
pub async fn handle_mode_command<W>(writer: &mut W, args: &[&str]) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "MODE", args, 1).await? {
        return Ok(());
    }

    let response = match args[0].to_ascii_uppercase().as_str() {
        "S" => REPLY_COMMAND_OKAY,
        "B" | "C" => REPLY_PARAMETER_NOT_IMPLEMENTED,
        other => {
            warn!("MODE: unknown mode: {}", other);
            REPLY_SYNTAX_ERROR
        }
    };
    send_response(writer, response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(args: &[&str]) -> Vec<u8> {
        let mut out = Vec::new();
        handle_mode_command(&mut out, args).await.unwrap();
        out
    }

    #[tokio::test]
    async fn test_mode() {
        assert_eq!(run(&["S"]).await, b"200 Command okay.\r\n");
        assert_eq!(run(&["s"]).await, b"200 Command okay.\r\n");
        assert!(run(&["B"]).await.starts_with(b"504 "));
        assert!(run(&["C"]).await.starts_with(b"504 "));
        assert!(run(&["Z"]).await.starts_with(b"501 "));
        assert!(run(&["S", "B"]).await.starts_with(b"501 "));
    }
}
