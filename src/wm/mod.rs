//! Window Manager - display surfaces for kernel tasks.
//!
//! Every task that talks to the user owns one window. The window manager
//! keeps them stacked on the host terminal and forwards keystrokes to the
//! focused one:
//!
//! - **manager**: Top-level `WindowManager` (create, destroy, print, clear, focus)
//! - **window**: A bordered window with its input queue
//! - **screen**: Text grid with cursor, wrap, scroll and destructive backspace
//!
//! # Module Hierarchy
//!
//! ```text
//! wm/
//! ├── mod.rs      - Module exports
//! ├── manager.rs  - WindowManager (top-level coordinator)
//! ├── window.rs   - Window (screen + input queue)
//! └── screen.rs   - Screen (cell grid)
//! ```

pub mod manager;
pub mod screen;
pub mod window;

pub use manager::WindowManager;
pub use window::{Window, WindowId};
