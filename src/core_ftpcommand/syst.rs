use crate::helpers::{expect_args, send_response};
use log::info;
use tokio::io::AsyncWrite;

/// Handles the SYST (System) FTP command.
pub async fn handle_syst_command<W>(writer: &mut W, args: &[&str]) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "SYST", args, 0).await? {
        return Ok(());
    }

    info!("Responding to SYST command with system type.");
    send_response(writer, b"215 UNIX\r\n").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_syst() {
        let mut out = Vec::new();
        handle_syst_command(&mut out, &[]).await.unwrap();
        assert_eq!(out, b"215 UNIX\r\n");

        let mut out = Vec::new();
        handle_syst_command(&mut out, &["extra"]).await.unwrap();
        assert!(out.starts_with(b"501 "));
    }
}
