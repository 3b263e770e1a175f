use crate::config::ServerConfig;
use crate::constants::{MAX_COMMAND_LENGTH, REPLY_SERVICE_READY};
use crate::core_ftpcommand::handlers::{handle_command, loggable_command, CommandFlow};
use crate::helpers::send_response;
use crate::session::{Session, SessionSettings};
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// Binds the control port and serves clients until the process ends.
///
/// Failing to bind is fatal; everything after that is handled per connection.
pub async fn start_server(config: Arc<ServerConfig>) -> Result<()> {
    let addr = config.listen_socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Unable to listen on {}", addr))?;
    info!("Server listening on {}", addr);

    serve(listener, config).await
}

/// The accept loop. Each control connection gets its own task and its own `Session`.
pub async fn serve(listener: TcpListener, config: Arc<ServerConfig>) -> Result<()> {
    loop {
        let (socket, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Unable to accept incoming connection: {}", e);
                continue;
            }
        };
        info!("New connection from {}", addr);

        let config = Arc::clone(&config);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, &config).await {
                error!("Connection error for {}: {:#}", addr, e);
            }
            info!("Connection closed for {}", addr);
        });
    }
}

/// Runs one session: greeting, then the command loop until QUIT or a control connection failure.
pub async fn handle_connection(socket: TcpStream, config: &ServerConfig) -> Result<()> {
    let peer = socket.peer_addr().context("bad remote address")?;
    let local = socket.local_addr().context("bad local address")?;

    let mut session = Session::new(
        peer,
        local,
        PathBuf::from(&config.root_dir),
        SessionSettings::from_config(config),
    );

    let (read_half, mut writer) = socket.into_split();
    let mut reader = BufReader::new(read_half);

    send_response(&mut writer, REPLY_SERVICE_READY).await?;

    let mut line = Vec::new();
    loop {
        line.clear();
        let n = match (&mut reader)
            .take(MAX_COMMAND_LENGTH as u64)
            .read_until(b'\n', &mut line)
            .await
        {
            Ok(n) => n,
            Err(e) => {
                debug!("Read error from {}: {}", peer, e);
                break;
            }
        };
        if n == 0 {
            debug!("Client {} disconnected", peer);
            break;
        }
        if n == MAX_COMMAND_LENGTH && line.last() != Some(&b'\n') {
            warn!("Command line from {} exceeds {} bytes", peer, MAX_COMMAND_LENGTH);
            break;
        }

        let command = String::from_utf8_lossy(&line);
        let command = command.trim_end_matches(['\r', '\n']);
        debug!("CMD from {}: {}", peer, loggable_command(command));

        if let CommandFlow::Quit = handle_command(&mut writer, &mut session, command).await? {
            break;
        }
    }

    Ok(())
}
