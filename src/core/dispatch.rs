//! Command dispatch.
//!
//! Every command maps to exactly one effect on the console or the kernel.
//! Nothing here fails outward: problems are printed to the console.

use tracing::{info, warn};

use super::command::{Command, CommandError, Listing};
use super::ps;
use super::session::{ShellOptions, PONG_TASK_NAME, SHELL_TASK_NAME};
use super::sys::{Console, Kernel, TaskEntry};

/// Command reference printed by `help`
pub const HELP_TEXT: &str = "\
TOS shell commands:
  help : lists available commands
  clear : clear the shell
  shell : create a new shell
  pong : play a game of pong
  echo <text> : print text to the shell
  ps [-d] : list running processes
  about : a message from the author
";

/// Printed by `about`
pub const ABOUT_TEXT: &str = "tosh was written by people who really, really like programming.\n";

/// Carry out a resolved command.
pub fn execute<C, K>(
    console: &mut C,
    kernel: &K,
    options: &ShellOptions,
    resolved: Result<Command<'_>, CommandError>,
) where
    C: Console + ?Sized,
    K: Kernel,
{
    let command = match resolved {
        Ok(command) => command,
        Err(e) => {
            console.print(&format!("{}\n", e));
            console.print("Type 'help' for available commands\n");
            return;
        }
    };

    match command {
        Command::Help => console.print(HELP_TEXT),
        Command::Clear => console.clear(),
        Command::Shell => spawn(
            console,
            kernel,
            TaskEntry::Shell,
            options.shell_priority,
            SHELL_TASK_NAME,
        ),
        Command::Pong => spawn(
            console,
            kernel,
            TaskEntry::Pong,
            options.pong_priority,
            PONG_TASK_NAME,
        ),
        Command::Echo(text) => console.print(&format!("{}\n", text)),
        Command::ListProcesses(listing) => {
            let mut out = String::new();
            let written = match listing {
                Listing::Compact => ps::write_compact(&mut out, kernel),
                Listing::Detailed => ps::write_detailed(&mut out, kernel),
            };
            if written.is_ok() {
                console.print(&out);
            }
        }
        Command::About => console.print(ABOUT_TEXT),
    }
}

fn spawn<C, K>(console: &mut C, kernel: &K, entry: TaskEntry, priority: u8, name: &str)
where
    C: Console + ?Sized,
    K: Kernel,
{
    match kernel.create_task(entry, priority, name) {
        Ok(pid) => info!("Started {} as pid {}", name, pid),
        Err(e) => {
            warn!("Failed to start {}: {}", name, e);
            console.print(&format!("{}: {}\n", name, e));
        }
    }
}
