// FTP commands understood by the server, one module per verb
pub mod cwd;
pub mod list;
pub mod mode;
pub mod noop;
pub mod pass;
pub mod pwd;
pub mod quit;
pub mod retr;
pub mod stor;
pub mod stru;
pub mod syst;
pub mod type_;
pub mod user;

// Parsing and dispatch
pub mod ftpcommand;
pub mod handlers;

// The utils and common functions are here
pub mod utils;
