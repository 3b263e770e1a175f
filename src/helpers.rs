use crate::constants::REPLY_SYNTAX_ERROR;
use log::warn;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Sends a reply on the control connection.
pub async fn send_response<W>(writer: &mut W, message: &[u8]) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(message).await?;
    writer.flush().await?;
    Ok(())
}

/// Sends a formatted single-line reply, appending the CRLF terminator.
pub async fn send_reply<W>(writer: &mut W, code: u16, text: &str) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    send_response(writer, format!("{} {}\r\n", code, text).as_bytes()).await
}

/// Checks the argument count, replying 501 on a mismatch.
///
/// Returns `Ok(false)` when the command must stop here.
pub async fn expect_args<W>(
    writer: &mut W,
    command: &str,
    args: &[&str],
    expected: usize,
) -> Result<bool, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if args.len() == expected {
        return Ok(true);
    }
    warn!("{}: bad arguments count: {:?}", command, args);
    send_response(writer, REPLY_SYNTAX_ERROR).await?;
    Ok(false)
}
