//! Window - A bordered display surface

use std::sync::mpsc::Sender;

use super::screen::Screen;

/// Unique identifier for a window (the display surface id handed to tasks)
pub type WindowId = u64;

/// A window containing a text screen and the input queue of its owner task
pub struct Window {
    /// Unique identifier
    pub id: WindowId,
    /// Text contents
    pub screen: Screen,
    /// Position (column, row) on the host terminal, border included
    pub x: u16,
    pub y: u16,
    /// Size (width, height), border included
    pub width: u16,
    pub height: u16,
    /// Whether this window receives keyboard input
    pub focused: bool,
    /// Title shown in the top border
    pub title: String,
    /// Keyboard units for the owning task
    input: Sender<u8>,
}

impl Window {
    /// Create a new window
    pub fn new(id: WindowId, x: u16, y: u16, width: u16, height: u16, title: &str, input: Sender<u8>) -> Self {
        let width = width.max(3);
        let height = height.max(3);
        Self {
            id,
            screen: Screen::new(width - 2, height - 2),
            x,
            y,
            width,
            height,
            focused: false,
            title: title.to_string(),
            input,
        }
    }

    /// Get the inner dimensions (excluding border)
    pub fn inner_size(&self) -> (u16, u16) {
        (self.width.saturating_sub(2).max(1), self.height.saturating_sub(2).max(1))
    }

    /// Get the inner position (excluding border)
    pub fn inner_pos(&self) -> (u16, u16) {
        (self.x + 1, self.y + 1)
    }

    /// Move the window
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.x = x;
        self.y = y;
    }

    /// Resize the window
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width.max(3);
        self.height = height.max(3);
        let (inner_w, inner_h) = self.inner_size();
        self.screen.resize(inner_w, inner_h);
    }

    /// Get display title
    pub fn display_title(&self) -> String {
        format!(" {}:{} ", self.id, self.title)
    }

    /// Queue an input unit for the owning task.
    ///
    /// Returns false when the task is gone.
    pub fn send(&self, unit: u8) -> bool {
        self.input.send(unit).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_inner_geometry() {
        let (tx, _rx) = mpsc::channel();
        let window = Window::new(1, 10, 3, 50, 17, "shell", tx);
        assert_eq!(window.inner_pos(), (11, 4));
        assert_eq!(window.inner_size(), (48, 15));
        assert_eq!((window.screen.cols, window.screen.rows), (48, 15));
    }

    #[test]
    fn test_send_fails_once_receiver_dropped() {
        let (tx, rx) = mpsc::channel();
        let window = Window::new(1, 0, 0, 10, 5, "w", tx);
        assert!(window.send(b'a'));
        assert_eq!(rx.recv(), Ok(b'a'));
        drop(rx);
        assert!(!window.send(b'b'));
    }
}
