//! Text grid behind a window
//!
//! A fixed-size grid of cells with a cursor. Printing wraps at the right edge
//! and scrolls at the bottom; backspace erases the cell before the cursor.

use unicode_width::UnicodeWidthChar;

/// A single character cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    /// Display width: 1, 2 for wide characters, 0 for the right half of a wide character
    pub width: u8,
}

impl Default for Cell {
    fn default() -> Self {
        Self { ch: ' ', width: 1 }
    }
}

impl Cell {
    pub fn continuation() -> Self {
        Self { ch: ' ', width: 0 }
    }

    pub fn is_continuation(&self) -> bool {
        self.width == 0
    }
}

/// Window contents
pub struct Screen {
    pub cols: u16,
    pub rows: u16,
    cells: Vec<Vec<Cell>>,
    pub cursor_col: u16,
    pub cursor_row: u16,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![vec![Cell::default(); cols as usize]; rows as usize],
            cursor_col: 0,
            cursor_row: 0,
        }
    }

    /// Print text at the cursor
    pub fn write_str(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' => {
                    self.cursor_col = 0;
                    self.linefeed();
                }
                '\r' => self.cursor_col = 0,
                '\x08' => self.erase_back(),
                '\t' => self.horizontal_tab(),
                c if c.is_control() => {}
                c => self.put_char(c),
            }
        }
    }

    /// Put a character at the cursor position, wrapping first if it does not fit
    pub fn put_char(&mut self, ch: char) {
        let width = ch.width().unwrap_or(0) as u16;
        if width == 0 || width > self.cols {
            return;
        }

        if self.cursor_col + width > self.cols {
            self.cursor_col = 0;
            self.linefeed();
        }

        let row = self.cursor_row as usize;
        let col = self.cursor_col as usize;
        self.clear_wide_remnants(row, col);

        self.cells[row][col] = Cell {
            ch,
            width: width as u8,
        };
        if width == 2 {
            self.cells[row][col + 1] = Cell::continuation();
        }
        self.cursor_col += width;
    }

    /// Destructive backspace: step back one character and blank it
    pub fn erase_back(&mut self) {
        if self.cursor_col == 0 {
            if self.cursor_row == 0 {
                return;
            }
            // Step back onto the previous (wrapped) row
            self.cursor_row -= 1;
            self.cursor_col = self.cols;
        }

        self.cursor_col -= 1;
        let row = self.cursor_row as usize;
        if self.cells[row][self.cursor_col as usize].is_continuation() && self.cursor_col > 0 {
            self.cursor_col -= 1;
        }
        let col = self.cursor_col as usize;
        let wide = self.cells[row][col].width == 2;
        self.cells[row][col] = Cell::default();
        if wide && col + 1 < self.cols as usize {
            self.cells[row][col + 1] = Cell::default();
        }
    }

    /// Move cursor down, scroll if needed
    pub fn linefeed(&mut self) {
        if self.cursor_row + 1 >= self.rows {
            self.scroll_up();
        } else {
            self.cursor_row += 1;
        }
    }

    /// Move to the next tab stop (every 8 columns)
    pub fn horizontal_tab(&mut self) {
        let next = ((self.cursor_col / 8) + 1) * 8;
        if next >= self.cols {
            self.cursor_col = self.cols;
        } else {
            self.cursor_col = next;
        }
    }

    /// Scroll the contents up by one row
    pub fn scroll_up(&mut self) {
        self.cells.remove(0);
        self.cells.push(vec![Cell::default(); self.cols as usize]);
    }

    /// Blank every cell and home the cursor
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(Cell::default());
        }
        self.cursor_col = 0;
        self.cursor_row = 0;
    }

    /// Resize, keeping the bottom-most rows and clamping the cursor
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let cols = cols.max(1);
        let rows = rows.max(1);
        for row in &mut self.cells {
            row.resize(cols as usize, Cell::default());
        }
        while self.cells.len() > rows as usize {
            self.cells.remove(0);
            self.cursor_row = self.cursor_row.saturating_sub(1);
        }
        while self.cells.len() < rows as usize {
            self.cells.push(vec![Cell::default(); cols as usize]);
        }
        self.cols = cols;
        self.rows = rows;
        self.cursor_col = self.cursor_col.min(cols);
        self.cursor_row = self.cursor_row.min(rows - 1);
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.cells.get(row).map(|r| r.as_slice())
    }

    /// Text of a row with trailing blanks removed
    pub fn row_text(&self, row: usize) -> String {
        let text: String = self
            .row(row)
            .unwrap_or_default()
            .iter()
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect();
        text.trim_end().to_string()
    }

    fn clear_wide_remnants(&mut self, row: usize, col: usize) {
        let cols = self.cols as usize;
        let cells = &mut self.cells[row];
        // Overwriting the right half of a wide char
        if col > 0 && cells[col].is_continuation() {
            cells[col - 1] = Cell::default();
        }
        // Overwriting the left half of a wide char
        if cells[col].width == 2 && col + 1 < cols {
            cells[col + 1] = Cell::default();
        }
    }
}
