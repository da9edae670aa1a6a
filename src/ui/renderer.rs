//! Renderer for stacked task windows.
//!
//! Every frame is a full redraw: the content area is cleared, windows are
//! painted bottom to top so the focused one ends up on top, then the status
//! bar is drawn and the cursor parked inside the focused window.
//!
//! ```text
//! begin_frame()  → Hide cursor, disable autowrap, start sync
//!     ↓
//! draw()         → Windows, status bar, cursor
//!     ↓
//! end_frame()    → Show cursor, enable autowrap, end sync, flush
//! ```

use std::io::{self, Write};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use unicode_width::UnicodeWidthStr;

use crate::config::ColorScheme;
use crate::wm::{Window, WindowManager};

/// Key hints shown at the right of the status bar
const SHORTCUTS: &str = "Ctrl+O: next | Ctrl+W: close | Ctrl+Q: quit";

/// Begin a render frame (synchronized update, hide cursor, disable autowrap)
fn begin_frame<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[?2026h")?;
    write!(out, "\x1b[?7l")?;
    queue!(out, Hide)?;
    Ok(())
}

/// End a render frame (show cursor, enable autowrap, end synchronized update, flush)
fn end_frame<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Show)?;
    write!(out, "\x1b[?7h")?;
    write!(out, "\x1b[?2026l")?;
    out.flush()
}

/// Border characters
struct BorderChars {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BorderChars {
    fn single() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
        }
    }
}

/// Window renderer
pub struct Renderer {
    initialized: bool,
    pub color_scheme: ColorScheme,
    /// Last rendered window manager generation
    last_generation: u64,
}

impl Renderer {
    pub fn with_color_scheme(color_scheme: ColorScheme) -> Self {
        Self {
            initialized: false,
            color_scheme,
            last_generation: 0,
        }
    }

    /// Initialize the terminal
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            Clear(ClearType::All)
        )?;
        stdout.flush()?;

        self.initialized = true;
        Ok(())
    }

    /// Cleanup
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }

        let mut stdout = io::stdout();

        // Restore terminal state (in case of abnormal exit)
        write!(stdout, "\x1b[?7h")?;
        write!(stdout, "\x1b[?2026l")?;
        stdout.flush()?;

        execute!(stdout, Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        self.initialized = false;
        Ok(())
    }

    /// Whether the window manager changed since the last frame
    pub fn needs_render(&self, wm: &WindowManager) -> bool {
        wm.generation() != self.last_generation
    }

    /// Force the next `render_if_changed` to draw
    pub fn invalidate(&mut self) {
        self.last_generation = 0;
    }

    /// Render only when something changed
    pub fn render_if_changed(&mut self, wm: &WindowManager) -> io::Result<()> {
        if self.needs_render(wm) {
            self.render(wm)?;
        }
        Ok(())
    }

    /// Render the window manager state
    pub fn render(&mut self, wm: &WindowManager) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = io::BufWriter::with_capacity(65536, stdout.lock());

        begin_frame(&mut out)?;
        let result = self.draw(&mut out, wm);
        // Always end frame, even on error
        let _ = end_frame(&mut out);
        result
    }

    /// Draw one frame into `out`
    fn draw<W: Write>(&mut self, out: &mut W, wm: &WindowManager) -> io::Result<()> {
        let (_, content_h) = wm.content_size();

        queue!(out, ResetColor)?;
        for row in 0..content_h {
            queue!(out, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
        }

        for window in wm.windows_in_order() {
            self.render_border(out, window)?;
            self.render_content(out, window)?;
        }
        self.render_status_bar(out, wm)?;

        if let Some(window) = wm.focused_window() {
            let (inner_x, inner_y) = window.inner_pos();
            let screen = &window.screen;
            let col = screen.cursor_col.min(screen.cols.saturating_sub(1));
            let row = screen.cursor_row.min(screen.rows.saturating_sub(1));
            queue!(out, MoveTo(inner_x + col, inner_y + row))?;
        }

        self.last_generation = wm.generation();
        Ok(())
    }

    /// Render window text
    fn render_content<W: Write>(&self, out: &mut W, window: &Window) -> io::Result<()> {
        let (inner_x, inner_y) = window.inner_pos();
        let (inner_w, inner_h) = window.inner_size();

        for row_idx in 0..inner_h as usize {
            queue!(out, MoveTo(inner_x, inner_y + row_idx as u16))?;
            let line = window.screen.row_text(row_idx);

            // Pad the rest of the line to cover windows underneath
            let used = line.width();
            let pad = (inner_w as usize).saturating_sub(used);
            write!(out, "{}{:pad$}", line, "", pad = pad)?;
        }
        Ok(())
    }

    /// Render window border with its title
    fn render_border<W: Write>(&self, out: &mut W, window: &Window) -> io::Result<()> {
        let cs = &self.color_scheme;
        let chars = BorderChars::single();
        let border = if window.focused {
            cs.window_border_active
        } else {
            cs.window_border
        };
        queue!(out, SetForegroundColor(border.to_crossterm()))?;

        // Top border
        queue!(out, MoveTo(window.x, window.y))?;
        write!(out, "{}", chars.top_left)?;

        let title_space = (window.width as usize).saturating_sub(4);
        let title: String = window.display_title().chars().take(title_space).collect();
        let remaining = (window.width as usize).saturating_sub(2 + title.width());
        let left_pad = remaining / 2;
        let right_pad = remaining - left_pad;

        write!(out, "{}", chars.horizontal.to_string().repeat(left_pad))?;
        if window.focused {
            queue!(out, SetForegroundColor(cs.title_active_fg.to_crossterm()))?;
        }
        write!(out, "{}", title)?;
        queue!(out, SetForegroundColor(border.to_crossterm()))?;
        write!(out, "{}", chars.horizontal.to_string().repeat(right_pad))?;
        write!(out, "{}", chars.top_right)?;

        // Side borders
        for row in 1..window.height.saturating_sub(1) {
            queue!(out, MoveTo(window.x, window.y + row))?;
            write!(out, "{}", chars.vertical)?;
            queue!(out, MoveTo(window.x + window.width - 1, window.y + row))?;
            write!(out, "{}", chars.vertical)?;
        }

        // Bottom border
        queue!(out, MoveTo(window.x, window.y + window.height - 1))?;
        write!(out, "{}", chars.bottom_left)?;
        write!(out, "{}", chars.horizontal.to_string().repeat(window.width.saturating_sub(2) as usize))?;
        write!(out, "{}", chars.bottom_right)?;

        queue!(out, ResetColor)?;
        Ok(())
    }

    /// Render the status bar
    fn render_status_bar<W: Write>(&self, out: &mut W, wm: &WindowManager) -> io::Result<()> {
        let cs = &self.color_scheme;
        let status_y = wm.height.saturating_sub(1);
        queue!(
            out,
            MoveTo(0, status_y),
            SetBackgroundColor(cs.status_bar_bg.to_crossterm()),
            SetForegroundColor(cs.status_bar_fg.to_crossterm())
        )?;

        let status = wm.status_info();
        let padding = (wm.width as usize).saturating_sub(status.width() + SHORTCUTS.width() + 1);
        let bar: String = format!("{}{:padding$}{} ", status, "", SHORTCUTS, padding = padding)
            .chars()
            .take(wm.width as usize)
            .collect();
        write!(out, "{}", bar)?;

        queue!(out, ResetColor)?;
        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
