//! Window Manager - Owns every display surface and routes keyboard input

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver};

use tracing::info;

use super::window::{Window, WindowId};

/// Placement offset applied to each cascaded window
const CASCADE_STEP: (u16, u16) = (2, 1);

/// Window Manager - handles window creation, stacking and focus
pub struct WindowManager {
    /// All windows
    windows: HashMap<WindowId, Window>,
    /// Stacking order, bottom first
    order: Vec<WindowId>,
    /// Window receiving keyboard input
    focused: Option<WindowId>,
    /// Next window ID
    next_id: WindowId,
    /// Terminal dimensions
    pub width: u16,
    pub height: u16,
    /// Height reserved for the status bar
    pub status_bar_height: u16,
    /// Offset each new window from the requested position
    pub cascade: bool,
    /// Bumped on every visible change
    generation: u64,
}

impl WindowManager {
    /// Create a new window manager
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            windows: HashMap::new(),
            order: Vec::new(),
            focused: None,
            next_id: 1,
            width,
            height,
            status_bar_height: 1,
            cascade: true,
            generation: 1,
        }
    }

    /// Get content area dimensions (excluding status bar)
    pub fn content_size(&self) -> (u16, u16) {
        (self.width, self.height.saturating_sub(self.status_bar_height))
    }

    /// Create a window and give it focus.
    ///
    /// Returns the window id and the receiving end of its input queue.
    pub fn create_window(&mut self, x: u16, y: u16, width: u16, height: u16, title: &str) -> (WindowId, Receiver<u8>) {
        let id = self.next_id;
        self.next_id += 1;

        let (x, y) = if self.cascade {
            let n = self.windows.len() as u16;
            (x + CASCADE_STEP.0 * n, y + CASCADE_STEP.1 * n)
        } else {
            (x, y)
        };

        let (tx, rx) = mpsc::channel();
        let mut window = Window::new(id, x, y, width, height, title, tx);
        self.fit(&mut window);

        info!("Window {} created ({}x{} at {},{})", id, window.width, window.height, window.x, window.y);
        self.windows.insert(id, window);
        self.order.push(id);
        self.focus(id);
        (id, rx)
    }

    /// Destroy a window. Its task sees the surface as closed.
    pub fn destroy_window(&mut self, id: WindowId) -> bool {
        if self.windows.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|&w| w != id);
        info!("Window {} destroyed", id);

        if self.focused == Some(id) {
            self.focused = None;
            if let Some(&top) = self.order.last() {
                self.focus(top);
            }
        }
        self.touch();
        true
    }

    /// Destroy the focused window
    pub fn close_focused(&mut self) -> bool {
        match self.focused {
            Some(id) => self.destroy_window(id),
            None => false,
        }
    }

    /// Print text into a window
    pub fn print(&mut self, id: WindowId, text: &str) -> bool {
        match self.windows.get_mut(&id) {
            Some(window) => {
                window.screen.write_str(text);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Clear a window
    pub fn clear(&mut self, id: WindowId) -> bool {
        match self.windows.get_mut(&id) {
            Some(window) => {
                window.screen.clear();
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Send an input unit to the focused window's task
    pub fn send_input(&mut self, unit: u8) -> bool {
        self.focused_window()
            .map(|w| w.send(unit))
            .unwrap_or(false)
    }

    /// Focus a window and raise it to the top
    pub fn focus(&mut self, id: WindowId) {
        if !self.windows.contains_key(&id) {
            return;
        }
        for window in self.windows.values_mut() {
            window.focused = window.id == id;
        }
        self.order.retain(|&w| w != id);
        self.order.push(id);
        self.focused = Some(id);
        self.touch();
    }

    /// Move focus to the window at the bottom of the stack
    pub fn focus_next(&mut self) {
        if let Some(&bottom) = self.order.first() {
            self.focus(bottom);
        }
    }

    /// Resize the terminal area, pulling windows back inside it
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let ids: Vec<WindowId> = self.order.clone();
        for id in ids {
            if let Some(mut window) = self.windows.remove(&id) {
                self.fit(&mut window);
                self.windows.insert(id, window);
            }
        }
        self.touch();
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn focused_window(&self) -> Option<&Window> {
        self.focused.and_then(|id| self.windows.get(&id))
    }

    /// Windows bottom to top
    pub fn windows_in_order(&self) -> impl Iterator<Item = &Window> {
        self.order.iter().filter_map(|id| self.windows.get(id))
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Change counter for the renderer
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Get status info string
    pub fn status_info(&self) -> String {
        let focused = self
            .focused_window()
            .map(|w| format!("{}:{}", w.id, w.title))
            .unwrap_or_else(|| "-".to_string());
        format!(" tosh | windows: {} | focus: {} ", self.len(), focused)
    }

    fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Shrink and move a window so it lies inside the content area
    fn fit(&self, window: &mut Window) {
        let (max_w, max_h) = self.content_size();
        let width = window.width.min(max_w.max(3));
        let height = window.height.min(max_h.max(3));
        if (width, height) != (window.width, window.height) {
            window.resize(width, height);
        }
        let x = window.x.min(max_w.saturating_sub(window.width));
        let y = window.y.min(max_h.saturating_sub(window.height));
        window.move_to(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_focuses_new_window() {
        let mut wm = WindowManager::new(80, 24);
        let (a, _ra) = wm.create_window(10, 3, 50, 17, "shell_process");
        let (b, _rb) = wm.create_window(10, 3, 50, 17, "shell_process");
        assert_ne!(a, b);
        assert_eq!(wm.focused_window().map(|w| w.id), Some(b));

        // Cascaded
        let wb = wm.window(b).unwrap();
        assert_eq!((wb.x, wb.y), (12, 4));
    }

    #[test]
    fn test_input_goes_to_focused_window() {
        let mut wm = WindowManager::new(80, 24);
        let (_a, ra) = wm.create_window(0, 0, 20, 5, "a");
        let (_b, rb) = wm.create_window(0, 0, 20, 5, "b");

        assert!(wm.send_input(b'x'));
        assert_eq!(rb.try_recv(), Ok(b'x'));
        assert!(ra.try_recv().is_err());

        wm.focus_next();
        assert!(wm.send_input(b'y'));
        assert_eq!(ra.try_recv(), Ok(b'y'));
    }

    #[test]
    fn test_destroy_closes_input_queue() {
        let mut wm = WindowManager::new(80, 24);
        let (a, ra) = wm.create_window(0, 0, 20, 5, "a");
        assert!(wm.destroy_window(a));
        assert_eq!(ra.recv(), Err(mpsc::RecvError));
        assert!(wm.is_empty());
        assert!(!wm.print(a, "gone"));
        assert!(!wm.send_input(b'z'));
    }

    #[test]
    fn test_windows_fit_inside_terminal() {
        let mut wm = WindowManager::new(40, 12);
        let (a, _ra) = wm.create_window(30, 10, 50, 17, "big");
        let w = wm.window(a).unwrap();
        assert!(w.x + w.width <= 40);
        assert!(w.y + w.height <= 11);
    }

    #[test]
    fn test_print_bumps_generation() {
        let mut wm = WindowManager::new(80, 24);
        let (a, _ra) = wm.create_window(0, 0, 20, 5, "a");
        let before = wm.generation();
        assert!(wm.print(a, "hello"));
        assert!(wm.generation() > before);
        assert_eq!(wm.window(a).unwrap().screen.row_text(0), "hello");
    }
}
