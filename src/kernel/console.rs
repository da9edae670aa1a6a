//! Window console

use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::lock;
use super::task::Scheduler;
use crate::core::sys::{Console, Pid, ProcessState, ReadMode, SysError};
use crate::wm::{WindowId, WindowManager};

/// A task's window together with its input queue.
///
/// Dropping the console destroys the window.
pub struct WindowConsole {
    id: WindowId,
    input: Receiver<u8>,
    wm: Arc<Mutex<WindowManager>>,
    scheduler: Scheduler,
    pid: Pid,
}

impl WindowConsole {
    /// Create a window for task `pid` and focus it.
    pub fn open(scheduler: &Scheduler, pid: Pid, area: (u16, u16, u16, u16), title: &str) -> Self {
        let wm = Arc::clone(scheduler.window_manager());
        let (x, y, width, height) = area;
        let (id, input) = lock(&wm).create_window(x, y, width, height, title);
        debug!("Task {} owns window {}", pid, id);
        Self {
            id,
            input,
            wm,
            scheduler: scheduler.clone(),
            pid,
        }
    }

    /// Inner size of the window, if it still exists
    pub fn size(&self) -> Option<(u16, u16)> {
        lock(&self.wm).window(self.id).map(|w| w.inner_size())
    }
}

impl Console for WindowConsole {
    fn print(&mut self, text: &str) {
        lock(&self.wm).print(self.id, text);
    }

    fn clear(&mut self) {
        lock(&self.wm).clear(self.id);
    }

    fn read_unit(&mut self, mode: ReadMode) -> Result<Option<u8>, SysError> {
        match mode {
            ReadMode::Blocking => {
                self.scheduler.set_state(self.pid, ProcessState::ReplyBlocked);
                let unit = self.input.recv();
                self.scheduler.set_state(self.pid, ProcessState::Ready);
                unit.map(Some).map_err(|_| SysError::SurfaceClosed)
            }
            ReadMode::NonBlocking => match self.input.try_recv() {
                Ok(unit) => Ok(Some(unit)),
                Err(TryRecvError::Empty) => Ok(None),
                Err(TryRecvError::Disconnected) => Err(SysError::SurfaceClosed),
            },
        }
    }
}

impl Drop for WindowConsole {
    fn drop(&mut self) {
        lock(&self.wm).destroy_window(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn setup() -> (Scheduler, Pid) {
        let wm = Arc::new(Mutex::new(WindowManager::new(80, 24)));
        let scheduler = Scheduler::new(wm, Config::default());
        let pid = scheduler.register("test", 1).unwrap();
        (scheduler, pid)
    }

    #[test]
    fn test_print_and_read() {
        let (scheduler, pid) = setup();
        let mut console = WindowConsole::open(&scheduler, pid, (0, 0, 20, 5), "t");
        assert_eq!(console.size(), Some((18, 3)));

        console.print("hi");
        let id = console.id;
        let wm = Arc::clone(scheduler.window_manager());
        assert_eq!(lock(&wm).window(id).unwrap().screen.row_text(0), "hi");

        assert_eq!(console.read_unit(ReadMode::NonBlocking), Ok(None));
        lock(&wm).send_input(b'x');
        assert_eq!(console.read_unit(ReadMode::Blocking), Ok(Some(b'x')));
        assert_eq!(scheduler.records()[pid].state, ProcessState::Ready);
    }

    #[test]
    fn test_destroyed_window_reads_closed() {
        let (scheduler, pid) = setup();
        let mut console = WindowConsole::open(&scheduler, pid, (0, 0, 20, 5), "t");
        let wm = Arc::clone(scheduler.window_manager());
        lock(&wm).destroy_window(console.id);

        assert_eq!(console.read_unit(ReadMode::NonBlocking), Err(SysError::SurfaceClosed));
        assert_eq!(console.read_unit(ReadMode::Blocking), Err(SysError::SurfaceClosed));
        assert_eq!(console.size(), None);
        // Output to a dead surface is dropped
        console.print("ignored");
    }

    #[test]
    fn test_drop_destroys_window() {
        let (scheduler, pid) = setup();
        let console = WindowConsole::open(&scheduler, pid, (0, 0, 20, 5), "t");
        let wm = Arc::clone(scheduler.window_manager());
        assert_eq!(lock(&wm).len(), 1);
        drop(console);
        assert!(lock(&wm).is_empty());
    }
}
