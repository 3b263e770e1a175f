use crate::constants::{REPLY_FILE_STATUS_OKAY, REPLY_NOT_LOGGED_IN, REPLY_TRANSFER_OK};
use crate::core_ftpcommand::utils::construct_file_path;
use crate::core_network::acquire_data_connection;
use crate::helpers::{expect_args, send_response};
use crate::session::Session;
use log::{debug, error, info, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

/// Handles the STOR (Store File) FTP command.
///
/// Reads the data connection until it closes, converts line endings in ASCII mode, then
/// writes the result to `<working dir>/<name>`, replacing any existing file.
///
/// # Arguments
///
/// * `writer` - The control connection replies are written to.
/// * `session` - The client's session; must be logged in.
/// * `args` - The file name, as the only argument.
///
/// # Returns
///
/// `Err` only when the control connection fails. Transfer problems are answered with a reply.
pub async fn handle_stor_command<W>(
    writer: &mut W,
    session: &mut Session,
    args: &[&str],
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "STOR", args, 1).await? {
        return Ok(());
    }

    if !session.is_authenticated {
        warn!("STOR: not logged in ({})", session.control_peer);
        return send_response(writer, REPLY_NOT_LOGGED_IN).await;
    }

    let file_path = construct_file_path(&session.working_dir, args[0]);
    info!("Received STOR command for: {:?}", file_path);

    send_response(writer, REPLY_FILE_STATUS_OKAY).await?;

    let mut data_stream = match acquire_data_connection(writer, session).await {
        Ok(stream) => stream,
        Err(e) => {
            warn!("STOR: unable to get data connection: {}", e);
            return e.into_control_result();
        }
    };

    let received = receive_all(&mut data_stream, session.settings.upload_buffer_size).await;
    drop(data_stream);

    let data = session.transfer_type.decode(received);

    if let Err(e) = tokio::fs::write(&file_path, &data).await {
        error!("STOR: unable to store data: {:?} ({})", file_path, e);
        return send_response(writer, b"552 Requested file action aborted.\r\n").await;
    }

    info!("File stored successfully: {:?} ({} bytes)", file_path, data.len());
    send_response(writer, REPLY_TRANSFER_OK).await
}

/// Reads until end of stream. A read error also ends the transfer; what arrived so far is kept.
async fn receive_all<R>(reader: &mut R, buffer_size: usize) -> Vec<u8>
where
    R: AsyncRead + Unpin,
{
    let mut data = Vec::new();
    let mut buffer = vec![0; buffer_size];
    loop {
        match reader.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => data.extend_from_slice(&buffer[..n]),
            Err(e) => {
                debug!("STOR: data connection read ended with: {}", e);
                break;
            }
        }
    }
    data
}
