use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "nanoftpd", about = "A minimal RFC 959 FTP server written in Rust.")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Listen port, overrides the configuration file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Initial working directory of every session
    #[arg(short, long)]
    pub root: Option<String>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}
