// Whole sessions driven over real sockets.

use crate::config::ServerConfig;
use crate::core_network::network::serve;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};

struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: SocketAddr) -> Client {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, writer) = stream.into_split();
        let mut client = Client {
            reader: BufReader::new(read_half),
            writer,
        };
        assert_eq!(client.reply().await, "220 Service ready.\r\n");
        client
    }

    async fn reply(&mut self) -> String {
        let mut line = String::new();
        self.reader.read_line(&mut line).await.unwrap();
        line
    }

    async fn send(&mut self, command: &str) {
        self.writer
            .write_all(format!("{}\r\n", command).as_bytes())
            .await
            .unwrap();
    }

    async fn command(&mut self, command: &str) -> String {
        self.send(command).await;
        self.reply().await
    }

    async fn login(&mut self) {
        assert!(self.command("USER anonymous").await.starts_with("331 "));
        assert!(self.command("PASS guest").await.starts_with("230 "));
    }

    /// Sends PASV and connects to the advertised endpoint.
    async fn passive_data(&mut self) -> TcpStream {
        let reply = self.command("PASV").await;
        assert!(reply.starts_with("227 "), "{}", reply);
        let start = reply.find('(').unwrap() + 1;
        let end = reply.find(')').unwrap();
        let fields: Vec<u16> = reply[start..end]
            .split(',')
            .map(|f| f.parse().unwrap())
            .collect();
        let ip = format!("{}.{}.{}.{}", fields[0], fields[1], fields[2], fields[3]);
        let port = fields[4] * 256 + fields[5];
        TcpStream::connect((ip.as_str(), port)).await.unwrap()
    }
}

async fn start(root: &Path) -> SocketAddr {
    let config = ServerConfig {
        listen_address: "127.0.0.1".to_string(),
        root_dir: root.to_string_lossy().to_string(),
        ..ServerConfig::default()
    };
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, Arc::new(config)));
    addr
}

#[tokio::test]
async fn test_passive_list() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("hello.txt"), b"hello").unwrap();
    let mut client = Client::connect(start(root.path()).await).await;
    client.login().await;

    let mut data = client.passive_data().await;
    assert!(client.command("LIST").await.starts_with("150 "));
    let mut listing = String::new();
    data.read_to_string(&mut listing).await.unwrap();
    assert_eq!(client.reply().await, "226 Directory send OK.\r\n");

    assert!(listing.starts_with('-'));
    assert!(listing.ends_with(" hello.txt\r\n"));
}

#[tokio::test]
async fn test_binary_store_then_retrieve() {
    let root = tempfile::tempdir().unwrap();
    let mut client = Client::connect(start(root.path()).await).await;
    client.login().await;
    assert_eq!(client.command("TYPE I").await, "200 Command okay.\r\n");

    let payload: Vec<u8> = (0..100_000u32).map(|i| (i % 253) as u8).collect();

    let mut data = client.passive_data().await;
    assert!(client.command("STOR test.bin").await.starts_with("150 "));
    data.write_all(&payload).await.unwrap();
    data.shutdown().await.unwrap();
    drop(data);
    assert!(client.reply().await.starts_with("226 "));
    assert_eq!(std::fs::read(root.path().join("test.bin")).unwrap(), payload);

    let mut data = client.passive_data().await;
    assert!(client.command("RETR test.bin").await.starts_with("150 "));
    let mut received = Vec::new();
    data.read_to_end(&mut received).await.unwrap();
    assert!(client.reply().await.starts_with("226 "));
    assert_eq!(received, payload);
}

#[tokio::test]
async fn test_active_list() {
    let root = tempfile::tempdir().unwrap();
    let mut client = Client::connect(start(root.path()).await).await;

    let data_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = data_listener.local_addr().unwrap().port();
    let reply = client
        .command(&format!("PORT 127,0,0,1,{},{}", port >> 8, port & 0xff))
        .await;
    assert_eq!(reply, "200 Command okay.\r\n");

    client.send("LIST").await;
    let (mut data, _) = data_listener.accept().await.unwrap();
    assert!(client.reply().await.starts_with("150 "));
    let mut listing = Vec::new();
    data.read_to_end(&mut listing).await.unwrap();
    assert!(listing.is_empty());
    assert!(client.reply().await.starts_with("226 "));
}

#[tokio::test]
async fn test_transfers_require_login() {
    let root = tempfile::tempdir().unwrap();
    let mut client = Client::connect(start(root.path()).await).await;
    assert_eq!(client.command("STOR f.txt").await, "530 Not logged in.\r\n");
    assert_eq!(client.command("RETR f.txt").await, "530 Not logged in.\r\n");
    assert!(!root.path().join("f.txt").exists());
}

#[tokio::test]
async fn test_unknown_verb_keeps_session() {
    let root = tempfile::tempdir().unwrap();
    let mut client = Client::connect(start(root.path()).await).await;
    assert_eq!(client.command("XYZZY").await, "502 Command not implemented.\r\n");
    assert_eq!(client.command("NOOP").await, "200 Command okay.\r\n");
}

#[tokio::test]
async fn test_cwd_to_missing_directory() {
    let root = tempfile::tempdir().unwrap();
    let mut client = Client::connect(start(root.path()).await).await;
    let wd = root.path().to_string_lossy().to_string();

    assert_eq!(client.command("CWD does-not-exist").await, "431 No such directory\r\n");
    assert_eq!(
        client.command("PWD").await,
        format!("200 working directory is {}.\r\n", wd)
    );
}

#[tokio::test]
async fn test_quit_closes_connection() {
    let root = tempfile::tempdir().unwrap();
    let mut client = Client::connect(start(root.path()).await).await;
    assert_eq!(
        client.command("QUIT").await,
        "221 Service closing control connection. Logged out if appropriate.\r\n"
    );
    assert_eq!(client.reply().await, "");
}
