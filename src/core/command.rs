//! Built-in commands and their resolution.
//!
//! Resolution runs in two steps: the command token is matched exactly
//! against the known names, then the argument is checked against the shape
//! that command accepts. Failing either step gives the same error.

use thiserror::Error;

/// Layout of the process listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// Names only
    Compact,
    /// State, active marker, priority and name
    Detailed,
}

/// A validated built-in command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    Clear,
    Shell,
    Pong,
    Echo(&'a str),
    ListProcesses(Listing),
    About,
}

/// The only error the resolver reports
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("invalid command: {token}")]
    Invalid { token: String },
}

/// Flag accepted by `ps`
pub const DETAILED_FLAG: &str = "-d";

/// Resolve a command token and its argument.
pub fn resolve<'a>(command: &str, argument: &'a str) -> Result<Command<'a>, CommandError> {
    let invalid = || CommandError::Invalid {
        token: command.to_string(),
    };

    let resolved = match command {
        "help" => Command::Help,
        "clear" => Command::Clear,
        "shell" => Command::Shell,
        "pong" => Command::Pong,
        "echo" => return Ok(Command::Echo(argument)),
        "ps" => {
            return match argument {
                "" => Ok(Command::ListProcesses(Listing::Compact)),
                DETAILED_FLAG => Ok(Command::ListProcesses(Listing::Detailed)),
                _ => Err(invalid()),
            };
        }
        "about" => Command::About,
        _ => return Err(invalid()),
    };

    // Everything else takes no argument
    if argument.is_empty() {
        Ok(resolved)
    } else {
        Err(invalid())
    }
}
