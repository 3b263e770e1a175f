use crate::constants::REPLY_LOCAL_ERROR;
use crate::core_network::acquire_data_connection;
use crate::helpers::{expect_args, send_response};
use crate::session::Session;
use chrono::{DateTime, Local};
use log::{error, info, warn};
use std::fs::Metadata;
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Handles the LIST FTP command.
///
/// Sends one line per entry of the working directory over the data connection.
pub async fn handle_list_command<W>(
    writer: &mut W,
    session: &mut Session,
    args: &[&str],
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !expect_args(writer, "LIST", args, 0).await? {
        return Ok(());
    }

    let lines = match read_listing(&session.working_dir).await {
        Ok(lines) => lines,
        Err(e) => {
            error!("LIST: unable to read directory {:?}: {}", session.working_dir, e);
            return send_response(writer, b"553 Requested action not taken.\r\n").await;
        }
    };

    send_response(writer, b"150 Here comes the directory listing.\r\n").await?;

    let mut data_stream = match acquire_data_connection(writer, session).await {
        Ok(stream) => stream,
        Err(e) => {
            warn!("LIST: unable to get data connection: {}", e);
            return e.into_control_result();
        }
    };

    for line in &lines {
        if let Err(e) = data_stream.write_all(line.as_bytes()).await {
            error!("LIST: unable to send data: {}", e);
            return send_response(writer, REPLY_LOCAL_ERROR).await;
        }
    }
    if let Err(e) = data_stream.shutdown().await {
        warn!("LIST: error closing data connection: {}", e);
    }
    drop(data_stream);

    info!("Sent {} directory entries to {}", lines.len(), session.control_peer);
    send_response(writer, b"226 Directory send OK.\r\n").await
}

/// Formats every entry of `dir`, sorted by name.
pub async fn read_listing(dir: &Path) -> Result<Vec<String>, std::io::Error> {
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = read_dir.next_entry().await? {
        // does not follow symlinks
        let metadata = entry.metadata().await?;
        entries.push((entry.file_name().to_string_lossy().to_string(), metadata));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(entries
        .iter()
        .map(|(name, metadata)| format_list_line(name, metadata))
        .collect())
}

/// `<mode> <size> <mtime> <name>\r\n`
pub fn format_list_line(name: &str, metadata: &Metadata) -> String {
    let mtime: DateTime<Local> = metadata
        .modified()
        .map(DateTime::from)
        .unwrap_or_else(|_| Local::now());
    format!(
        "{} {:>10} {:>15} {}\r\n",
        mode_string(metadata),
        metadata.len(),
        mtime.format("%-d %b %Y").to_string(),
        name
    )
}

/// Ten-character mode string, e.g. `drwxr-xr-x`.
pub fn mode_string(metadata: &Metadata) -> String {
    let file_type = metadata.file_type();
    let kind = if file_type.is_dir() {
        'd'
    } else if file_type.is_symlink() {
        'L'
    } else {
        '-'
    };

    let bits = permission_bits(metadata);
    let mut mode = String::with_capacity(10);
    mode.push(kind);
    for (i, c) in "rwxrwxrwx".chars().enumerate() {
        mode.push(if bits & (1 << (8 - i)) != 0 { c } else { '-' });
    }
    mode
}

#[cfg(unix)]
fn permission_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
fn permission_bits(metadata: &Metadata) -> u32 {
    let base = if metadata.permissions().readonly() { 0o444 } else { 0o644 };
    if metadata.is_dir() {
        base | 0o111
    } else {
        base
    }
}
