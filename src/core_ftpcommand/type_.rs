use crate::constants::{REPLY_COMMAND_OKAY, REPLY_PARAMETER_NOT_IMPLEMENTED, REPLY_SYNTAX_ERROR};
use crate::core_transfer::TransferType;
use crate::helpers::send_response;
use crate::session::Session;
use log::{info, warn};
use tokio::io::AsyncWrite;

/// Handles the TYPE FTP command.
///
/// ASCII (non-print format only) and Image are supported. EBCDIC, Local byte and the
/// Telnet/ASA format controls answer 504.
///
/// # Arguments
///
/// * `writer` - The control connection replies are written to.
/// * `session` - The client's session, whose transfer type is updated.
/// * `args` - The type code, optionally followed by a format code.
///
/// # Returns
///
/// Result<(), std::io::Error> from writing the reply.
pub async fn handle_type_command<W>(
    writer: &mut W,
    session: &mut Session,
    args: &[&str],
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let primary_type = args.first().map(|s| s.to_ascii_uppercase());
    let format = args.get(1).map(|s| s.to_ascii_uppercase());

    let response = match (primary_type.as_deref(), format.as_deref(), args.len()) {
        (Some("A"), None, 1) | (Some("A"), Some("N"), 2) => {
            session.transfer_type = TransferType::Ascii;
            info!("Transfer type set to ASCII for {}", session.control_peer);
            REPLY_COMMAND_OKAY
        }
        (Some("A"), Some("T" | "C"), 2) => REPLY_PARAMETER_NOT_IMPLEMENTED,
        (Some("I"), _, _) => {
            session.transfer_type = TransferType::Binary;
            info!("Transfer type set to binary for {}", session.control_peer);
            REPLY_COMMAND_OKAY
        }
        (Some("E" | "L"), _, _) => REPLY_PARAMETER_NOT_IMPLEMENTED,
        _ => {
            warn!("TYPE: unsupported arguments: {:?}", args);
            REPLY_SYNTAX_ERROR
        }
    };

    send_response(writer, response).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::session_in;

    async fn run(session: &mut Session, args: &[&str]) -> Vec<u8> {
        let mut out = Vec::new();
        handle_type_command(&mut out, session, args).await.unwrap();
        out
    }

    #[tokio::test]
    async fn test_type_image_then_ascii() {
        let mut session = session_in("/tmp");
        assert_eq!(run(&mut session, &["I"]).await, b"200 Command okay.\r\n");
        assert_eq!(session.transfer_type, TransferType::Binary);

        assert_eq!(run(&mut session, &["A", "N"]).await, b"200 Command okay.\r\n");
        assert_eq!(session.transfer_type, TransferType::Ascii);

        run(&mut session, &["i"]).await;
        assert_eq!(session.transfer_type, TransferType::Binary);
        assert_eq!(run(&mut session, &["a"]).await, b"200 Command okay.\r\n");
        assert_eq!(session.transfer_type, TransferType::Ascii);
    }

    #[tokio::test]
    async fn test_type_not_implemented() {
        let mut session = session_in("/tmp");
        let cases: [&[&str]; 4] = [&["A", "T"], &["A", "C"], &["E"], &["L", "8"]];
        for args in cases {
            assert!(run(&mut session, args).await.starts_with(b"504 "), "{:?}", args);
        }
        assert_eq!(session.transfer_type, TransferType::Ascii);
    }

    #[tokio::test]
    async fn test_type_syntax_errors() {
        let mut session = session_in("/tmp");
        let cases: [&[&str]; 4] = [&[], &["X"], &["A", "Z"], &["A", "N", "extra"]];
        for args in cases {
            assert!(run(&mut session, args).await.starts_with(b"501 "), "{:?}", args);
        }
    }
}
