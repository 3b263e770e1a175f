use crate::constants::REPLY_NOT_IMPLEMENTED;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::{
    cwd, list, mode, noop, pass, pwd, quit, retr, stor, stru, syst, type_, user,
};
use crate::core_network::{pasv, port};
use crate::helpers::send_response;
use crate::session::Session;
use log::warn;
use tokio::io::AsyncWrite;

/// What the connection loop does after a command.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CommandFlow {
    Continue,
    Quit,
}

/// Parses one command line and runs its handler.
///
/// An `Err` means the control connection itself failed; protocol-level problems are answered
/// with a reply and the session continues.
pub async fn handle_command<W>(
    writer: &mut W,
    session: &mut Session,
    line: &str,
) -> Result<CommandFlow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let mut fields = line.split_whitespace();
    let Some(verb) = fields.next() else {
        return Ok(CommandFlow::Continue);
    };
    let args: Vec<&str> = fields.collect();

    let Some(command) = FtpCommand::from_str(verb) else {
        warn!("Unknown command from {}: {}", session.control_peer, verb);
        send_response(writer, REPLY_NOT_IMPLEMENTED).await?;
        return Ok(CommandFlow::Continue);
    };

    match command {
        FtpCommand::USER => user::handle_user_command(writer, session, &args).await?,
        FtpCommand::PASS => pass::handle_pass_command(writer, session, &args).await?,
        FtpCommand::SYST => syst::handle_syst_command(writer, &args).await?,
        FtpCommand::PASV => pasv::handle_pasv_command(writer, session, &args).await?,
        FtpCommand::EPSV => pasv::handle_epsv_command(writer, session, &args).await?,
        FtpCommand::PORT => port::handle_port_command(writer, session, &args).await?,
        FtpCommand::EPRT => port::handle_eprt_command(writer, session, &args).await?,
        FtpCommand::CWD => cwd::handle_cwd_command(writer, session, &args).await?,
        FtpCommand::PWD => pwd::handle_pwd_command(writer, session, &args).await?,
        FtpCommand::LIST => list::handle_list_command(writer, session, &args).await?,
        FtpCommand::STOR => stor::handle_stor_command(writer, session, &args).await?,
        FtpCommand::RETR => retr::handle_retr_command(writer, session, &args).await?,
        FtpCommand::TYPE => type_::handle_type_command(writer, session, &args).await?,
        FtpCommand::STRU => stru::handle_stru_command(writer, &args).await?,
        FtpCommand::MODE => mode::handle_mode_command(writer, &args).await?,
        FtpCommand::NOOP => noop::handle_noop_command(writer, &args).await?,
        FtpCommand::QUIT => {
            quit::handle_quit_command(writer).await?;
            return Ok(CommandFlow::Quit);
        }
    }

    Ok(CommandFlow::Continue)
}

/// The command line as it may appear in logs: PASS arguments are masked.
pub fn loggable_command(line: &str) -> String {
    match line.split_whitespace().next() {
        Some(verb) if verb.eq_ignore_ascii_case("PASS") => format!("{} ****", verb),
        _ => line.to_string(),
    }
}
