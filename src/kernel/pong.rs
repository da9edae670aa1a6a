//! Pong demo task
//!
//! Two computer-controlled paddles rally in the task's window until the user
//! presses `q` or the window is closed.

use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::core::sys::{Console, ReadMode};

/// Window size requested by the demo, border included
pub const PONG_WIDTH: u16 = 42;
pub const PONG_HEIGHT: u16 = 14;

const PADDLE_LEN: i32 = 3;
const QUIT_KEY: u8 = b'q';

/// Game state. Row 0 holds the score, the court is everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pong {
    cols: i32,
    rows: i32,
    ball: (i32, i32),
    velocity: (i32, i32),
    /// Top row of each paddle
    paddles: (i32, i32),
    pub score: (u32, u32),
    tick: u64,
}

impl Pong {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = i32::from(cols.max(8));
        let rows = i32::from(rows.max(PADDLE_LEN as u16 + 2));
        let paddle = 1 + (rows - 1 - PADDLE_LEN) / 2;
        let mut game = Self {
            cols,
            rows,
            ball: (0, 0),
            velocity: (1, 1),
            paddles: (paddle, paddle),
            score: (0, 0),
            tick: 0,
        };
        game.serve();
        game
    }

    /// Put the ball back in the middle of the court
    fn serve(&mut self) {
        self.ball = (self.cols / 2, 1 + (self.rows - 1) / 2);
    }

    /// Advance one frame
    pub fn step(&mut self) {
        self.tick += 1;
        // Paddles move at half the ball's speed so rallies can be lost
        if self.tick % 2 == 0 {
            let target = self.ball.1 - PADDLE_LEN / 2;
            self.paddles.0 = self.track(self.paddles.0, target);
            self.paddles.1 = self.track(self.paddles.1, target);
        }

        let (mut x, mut y) = (self.ball.0 + self.velocity.0, self.ball.1 + self.velocity.1);

        if y < 1 || y > self.rows - 1 {
            self.velocity.1 = -self.velocity.1;
            y = self.ball.1 + self.velocity.1;
        }

        if x <= 0 {
            if !Self::covers(self.paddles.0, y) {
                self.score.1 += 1;
                debug!("Pong point right: {:?}", self.score);
                self.velocity.0 = 1;
                self.serve();
                return;
            }
            self.velocity.0 = 1;
            x = self.ball.0 + 1;
        } else if x >= self.cols - 1 {
            if !Self::covers(self.paddles.1, y) {
                self.score.0 += 1;
                debug!("Pong point left: {:?}", self.score);
                self.velocity.0 = -1;
                self.serve();
                return;
            }
            self.velocity.0 = -1;
            x = self.ball.0 - 1;
        }

        self.ball = (x, y);
    }

    fn track(&self, paddle: i32, target: i32) -> i32 {
        let moved = paddle + (target - paddle).signum();
        moved.clamp(1, self.rows - PADDLE_LEN)
    }

    fn covers(paddle: i32, y: i32) -> bool {
        (paddle..paddle + PADDLE_LEN).contains(&y)
    }

    /// Draw the frame. Every row is exactly `cols` wide and the last row has
    /// no trailing newline, so printing it never scrolls the window.
    pub fn render(&self) -> String {
        let width = self.cols as usize;
        let mut frame = String::with_capacity((width + 1) * self.rows as usize);

        let header = format!(" {} : {}   [q] quit", self.score.0, self.score.1);
        frame.extend(header.chars().chain(std::iter::repeat(' ')).take(width));

        for y in 1..self.rows {
            frame.push('\n');
            for x in 0..self.cols {
                let ch = if (x, y) == self.ball {
                    'o'
                } else if (x == 0 && Self::covers(self.paddles.0, y))
                    || (x == self.cols - 1 && Self::covers(self.paddles.1, y))
                {
                    '|'
                } else if x == self.cols / 2 {
                    ':'
                } else {
                    ' '
                };
                frame.push(ch);
            }
        }
        frame
    }
}

/// Run the demo on `console` until `q` is read or the console closes.
pub fn run<C: Console + ?Sized>(console: &mut C, cols: u16, rows: u16, frame: Duration) {
    let mut game = Pong::new(cols, rows);
    info!("Pong started ({}x{})", cols, rows);

    loop {
        match console.read_unit(ReadMode::NonBlocking) {
            Ok(Some(QUIT_KEY)) => break,
            Ok(_) => {}
            Err(e) => {
                info!("Pong ending: {}", e);
                return;
            }
        }

        game.step();
        console.clear();
        console.print(&game.render());
        thread::sleep(frame);
    }
    info!("Pong quit, final score {:?}", game.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::ScriptedConsole;

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let mut game = Pong::new(40, 12);
        game.ball = (10, 1);
        game.velocity = (1, -1);
        game.step();
        assert_eq!(game.ball, (11, 2));
        assert_eq!(game.velocity, (1, 1));
    }

    #[test]
    fn test_paddle_returns_ball() {
        let mut game = Pong::new(40, 12);
        game.paddles.0 = 4;
        game.ball = (1, 5);
        game.velocity = (-1, 0);
        game.step();
        assert_eq!(game.velocity.0, 1);
        assert_eq!(game.ball, (2, 5));
        assert_eq!(game.score, (0, 0));
    }

    #[test]
    fn test_miss_scores_and_serves() {
        let mut game = Pong::new(40, 12);
        game.paddles.1 = 1;
        game.ball = (38, 9);
        game.velocity = (1, 0);
        game.step();
        assert_eq!(game.score, (1, 0));
        assert_eq!(game.ball, (20, 6));
        assert_eq!(game.velocity.0, -1);
    }

    #[test]
    fn test_render_dimensions() {
        let game = Pong::new(40, 12);
        let frame = game.render();
        let lines: Vec<&str> = frame.split('\n').collect();
        assert_eq!(lines.len(), 12);
        assert!(lines.iter().all(|l| l.chars().count() == 40));
        assert!(lines[0].starts_with(" 0 : 0"));
        assert!(!frame.ends_with('\n'));
        assert_eq!(frame.matches('o').count(), 1);
    }

    #[test]
    fn test_quit_key_stops_demo() {
        let mut console = ScriptedConsole::new(b"q");
        run(&mut console, 40, 12, Duration::ZERO);
        assert_eq!(console.clears, 0);
    }

    #[test]
    fn test_closed_console_stops_demo() {
        let mut console = ScriptedConsole::new(b"").with_idle_reads(3);
        run(&mut console, 40, 12, Duration::ZERO);
        assert_eq!(console.clears, 3);
        assert!(console.output.contains('o'));
    }
}
