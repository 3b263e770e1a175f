// src/constants.rs

pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_LISTEN_PORT: u16 = 21;
pub const DEFAULT_ROOT_DIR: &str = "/tmp";
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;
pub const MAX_COMMAND_LENGTH: usize = 64 * 1024;

// Replies shared by several commands
pub const REPLY_SERVICE_READY: &[u8] = b"220 Service ready.\r\n";
pub const REPLY_COMMAND_OKAY: &[u8] = b"200 Command okay.\r\n";
pub const REPLY_NOT_IMPLEMENTED: &[u8] = b"502 Command not implemented.\r\n";
pub const REPLY_PARAMETER_NOT_IMPLEMENTED: &[u8] =
    b"504 Command not implemented for that parameter.\r\n";
pub const REPLY_SYNTAX_ERROR: &[u8] = b"501 Syntax error in parameters or arguments.\r\n";
pub const REPLY_LOCAL_ERROR: &[u8] = b"451 Requested action aborted: local error in processing.\r\n";
pub const REPLY_CANT_OPEN_DATA: &[u8] = b"425 Can't open data connection.\r\n";
pub const REPLY_NOT_LOGGED_IN: &[u8] = b"530 Not logged in.\r\n";
pub const REPLY_TRANSFER_OK: &[u8] = b"226 Closing data connection, file transfer successful.\r\n";
pub const REPLY_FILE_STATUS_OKAY: &[u8] = b"150 File status okay; about to open data connection.\r\n";
