use crate::constants::{REPLY_FILE_STATUS_OKAY, REPLY_NOT_LOGGED_IN, REPLY_TRANSFER_OK};
use crate::core_ftpcommand::utils::construct_file_path;
use crate::core_network::acquire_data_connection;
use crate::helpers::{expect_args, send_response};
use crate::session::Session;
use log::{error, info, warn};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Handles the RETR (Retrieve) FTP command.
///
/// The whole file is read before the data connection is opened, so a missing file is
/// reported with 550 and no data connection.
///
/// # Arguments
///
/// * `writer` - The control connection replies are written to.
/// * `session` - The client's session; must be logged in.
/// * `args` - The file name, as the only argument.
///
/// # Returns
///
/// `Err` only when the control connection fails. A data connection lost mid-transfer is
/// answered with 426.
pub async fn handle_retr_command<W>(
    writer: &mut W,
    session: &mut Session,
    args: &[&str],
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "RETR", args, 1).await? {
        return Ok(());
    }

    if !session.is_authenticated {
        warn!("RETR: not logged in ({})", session.control_peer);
        return send_response(writer, REPLY_NOT_LOGGED_IN).await;
    }

    let file_path = construct_file_path(&session.working_dir, args[0]);
    let data = match tokio::fs::read(&file_path).await {
        Ok(data) => data,
        Err(e) => {
            warn!("RETR: unable to read file: {:?} ({})", file_path, e);
            return send_response(writer, b"550 Requested action not taken. File not found.\r\n")
                .await;
        }
    };
    let data = session.transfer_type.encode(data);

    send_response(writer, REPLY_FILE_STATUS_OKAY).await?;

    let mut data_stream = match acquire_data_connection(writer, session).await {
        Ok(stream) => stream,
        Err(e) => {
            warn!("RETR: unable to get data connection: {}", e);
            return e.into_control_result();
        }
    };

    info!("Sending file: {:?} ({} bytes)", file_path, data.len());
    for chunk in data.chunks(session.settings.download_buffer_size) {
        if let Err(e) = data_stream.write_all(chunk).await {
            error!("RETR: unable to send data: {}", e);
            return send_response(writer, b"426 Connection closed; transfer aborted.\r\n").await;
        }
    }
    if let Err(e) = data_stream.shutdown().await {
        error!("RETR: unable to close data connection: {}", e);
        return send_response(writer, b"426 Connection closed; transfer aborted.\r\n").await;
    }
    drop(data_stream);

    info!("File transfer completed successfully: {:?}", file_path);
    send_response(writer, REPLY_TRANSFER_OK).await
}
