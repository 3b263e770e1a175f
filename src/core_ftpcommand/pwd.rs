use crate::helpers::{expect_args, send_reply};
use crate::session::Session;
use tokio::io::AsyncWrite;

pub async fn handle_pwd_command<W>(
    writer: &mut W,
    session: &Session,
    args: &[&str],
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "PWD", args, 0).await? {
        return Ok(());
    }

    let text = format!("working directory is {}.", session.working_dir_display());
    send_reply(writer, 200, &text).await
}
