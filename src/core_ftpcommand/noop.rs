use crate::constants::REPLY_COMMAND_OKAY;
use crate::helpers::{expect_args, send_response};
use tokio::io::AsyncWrite;

pub async fn handle_noop_command<W>(writer: &mut W, args: &[&str]) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "NOOP", args, 0).await? {
        return Ok(());
    }
    send_response(writer, REPLY_COMMAND_OKAY).await
}
