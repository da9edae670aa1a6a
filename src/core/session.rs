//! Shell session
//!
//! One session per interpreter task. It owns the task's console and the
//! buffers reused by every iteration of the read loop.

use tracing::{debug, info};

use super::buffer::LineBuffer;
use super::command::resolve;
use super::dispatch::execute;
use super::line::LineEditor;
use super::sys::{Console, Kernel, SysError};
use super::token::tokenize;

/// Name given to shell tasks in the process table
pub const SHELL_TASK_NAME: &str = "shell_process";
/// Name given to pong tasks in the process table
pub const PONG_TASK_NAME: &str = "pong";

/// Per-session settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOptions {
    /// Printed before every line
    pub prompt: String,
    /// Priority of shells started with `shell`
    pub shell_priority: u8,
    /// Priority of the demo started with `pong`
    pub pong_priority: u8,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            shell_priority: 5,
            pong_priority: 5,
        }
    }
}

/// An interpreter instance
pub struct Session<C: Console, K: Kernel> {
    console: C,
    kernel: K,
    options: ShellOptions,
    editor: LineEditor,
    line: LineBuffer,
    command: LineBuffer,
    argument: LineBuffer,
}

impl<C: Console, K: Kernel> Session<C, K> {
    pub fn new(console: C, kernel: K, options: ShellOptions) -> Self {
        Self {
            console,
            kernel,
            options,
            editor: LineEditor::default(),
            line: LineBuffer::new(),
            command: LineBuffer::new(),
            argument: LineBuffer::new(),
        }
    }

    /// Run the read loop until the console is closed.
    pub fn run(&mut self) {
        info!("Shell session started");
        loop {
            if let Err(e) = self.step() {
                info!("Shell session ending: {}", e);
                break;
            }
        }
    }

    /// One iteration: prompt, read, resolve, execute.
    pub fn step(&mut self) -> Result<(), SysError> {
        self.reset();
        self.console.print(&self.options.prompt);
        self.editor.read_line(&mut self.console, &mut self.line)?;
        self.parse();

        let resolved = resolve(self.command.as_str(), self.argument.as_str());
        match &resolved {
            Ok(cmd) => debug!("Resolved {:?}", cmd),
            Err(e) => debug!("{}", e),
        }
        execute(&mut self.console, &self.kernel, &self.options, resolved);
        Ok(())
    }

    /// Clear all buffers.
    pub fn reset(&mut self) {
        self.line.clear();
        self.command.clear();
        self.argument.clear();
    }

    /// Split the line buffer into the command and argument buffers.
    fn parse(&mut self) {
        let (command, argument) = tokenize(self.line.as_str());
        self.command.set(command);
        self.argument.set(argument);
    }

    /// Resolution of the line currently held in the buffers.
    #[cfg(test)]
    fn resolved(&self) -> Result<super::command::Command<'_>, super::command::CommandError> {
        resolve(self.command.as_str(), self.argument.as_str())
    }
}
