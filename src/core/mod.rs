//! Shell interpreter core.
//!
//! This module contains everything between a raw keystroke and the effect of
//! a command:
//!
//! - **buffer**: Fixed-capacity line buffer
//! - **line**: Line editor (echo, destructive backspace, overflow cut-off)
//! - **token**: Command/argument tokenizer
//! - **command**: Command resolution and argument validation
//! - **dispatch**: Command effects
//! - **ps**: Process listing formatter
//! - **session**: The read loop tying it together
//! - **sys**: Interfaces to the kernel (console, tasks, process table)
//!
//! # Pipeline
//!
//! ```text
//! Session::step
//! ├── LineEditor::read_line   (blocks on Console::read_unit)
//! ├── tokenize                (command, argument)
//! ├── resolve                 (Command or CommandError)
//! └── execute                 (print / clear / spawn / ps)
//! ```

pub mod buffer;
pub mod command;
pub mod dispatch;
pub mod line;
pub mod ps;
pub mod session;
pub mod sys;
pub mod token;

#[cfg(test)]
pub mod testing;
