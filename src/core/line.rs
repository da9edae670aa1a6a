//! Line editor for a shell surface.
//!
//! Supports:
//! - Enter (0x0D, also 0x0A) - submit line
//! - Backspace / DEL (0x08 / 0x7F) - delete the last character
//! - Other ASCII - appended and echoed (Tab echoes as a space)
//! - Non-ASCII bytes - dropped without echo
//!
//! Input stops being accepted once the buffer is full; the line is then
//! submitted as-is.

use std::thread;

use tracing::debug;

use super::buffer::LineBuffer;
use super::sys::{Console, ReadMode, SysError};

/// Carriage return, sent by the Enter key
pub const KEY_ENTER: u8 = 0x0D;
/// Line feed, accepted as Enter
pub const KEY_LINEFEED: u8 = 0x0A;
/// Backspace, also the erase sequence echoed to the surface
pub const KEY_BACKSPACE: u8 = 0x08;
/// DEL, accepted as Backspace
pub const KEY_DELETE: u8 = 0x7F;

/// Reads one line from a console into a `LineBuffer`
#[derive(Debug, Clone, Copy)]
pub struct LineEditor {
    mode: ReadMode,
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new(ReadMode::Blocking)
    }
}

impl LineEditor {
    pub fn new(mode: ReadMode) -> Self {
        Self { mode }
    }

    /// Read a line into `line`, echoing edits to the console.
    ///
    /// `line` is cleared first. Fails only when the console has been closed.
    pub fn read_line<C: Console + ?Sized>(
        &self,
        console: &mut C,
        line: &mut LineBuffer,
    ) -> Result<(), SysError> {
        line.clear();

        loop {
            let unit = match console.read_unit(self.mode)? {
                Some(unit) => unit,
                None => {
                    // Non-blocking mode with nothing queued
                    thread::yield_now();
                    continue;
                }
            };

            match unit {
                KEY_ENTER | KEY_LINEFEED => break,

                KEY_BACKSPACE | KEY_DELETE => {
                    if !line.is_empty() {
                        line.pop();
                        console.print("\x08");
                    }
                }

                // A unit is one byte, so only ASCII can be a whole character
                _ if !unit.is_ascii() => {
                    debug!("Dropping non-ASCII unit {:#04x}", unit);
                }

                _ => {
                    if line.push(unit) {
                        let mut echo = [0u8; 4];
                        console.print(echo_char(unit).encode_utf8(&mut echo));
                    }
                    if line.is_full() {
                        debug!("Line reached {} bytes, submitting", line.len());
                        break;
                    }
                }
            }
        }

        console.print("\n");
        Ok(())
    }
}

/// Character echoed for an ASCII unit. Tab echoes as one space so a single
/// backspace erases it.
fn echo_char(unit: u8) -> char {
    if unit == b'\t' {
        ' '
    } else {
        char::from(unit)
    }
}
