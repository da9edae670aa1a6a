//! Host terminal rendering and keyboard input.
//!
//! - **renderer**: Draws the stacked windows and the status bar
//! - **keymapper**: Maps key events to window input units and window manager actions

pub mod keymapper;
pub mod renderer;

pub use keymapper::{KeyAction, KeyMapper};
pub use renderer::Renderer;
