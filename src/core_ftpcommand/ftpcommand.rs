#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand {
    USER,
    PASS,
    SYST,
    PASV,
    EPSV,
    CWD,
    PWD,
    LIST,
    STOR,
    RETR,
    PORT,
    EPRT,
    TYPE,
    STRU,
    MODE,
    QUIT,
    NOOP,
}

impl FtpCommand {
    pub fn from_str(cmd: &str) -> Option<FtpCommand> {
        match cmd.to_ascii_uppercase().as_str() {
            "USER" => Some(FtpCommand::USER),
            "PASS" => Some(FtpCommand::PASS),
            "SYST" => Some(FtpCommand::SYST),
            "PASV" => Some(FtpCommand::PASV),
            "EPSV" => Some(FtpCommand::EPSV),
            "CWD" => Some(FtpCommand::CWD),
            "PWD" => Some(FtpCommand::PWD),
            "LIST" => Some(FtpCommand::LIST),
            "STOR" => Some(FtpCommand::STOR),
            "RETR" => Some(FtpCommand::RETR),
            "PORT" => Some(FtpCommand::PORT),
            "EPRT" => Some(FtpCommand::EPRT),
            "TYPE" => Some(FtpCommand::TYPE),
            "STRU" => Some(FtpCommand::STRU),
            "MODE" => Some(FtpCommand::MODE),
            "QUIT" => Some(FtpCommand::QUIT),
            "NOOP" => Some(FtpCommand::NOOP),
            _ => None,
        }
    }
}
