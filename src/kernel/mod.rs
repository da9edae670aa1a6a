//! Host-side kernel services.
//!
//! Tasks are OS threads. Each one owns a window on the shared
//! [`WindowManager`](crate::wm::WindowManager) and reads its keyboard input
//! from that window's queue. The process table is shared by all tasks.
//!
//! - **process**: The fixed-size process table
//! - **task**: Task creation and the per-task kernel handle
//! - **console**: A window seen as a `Console`
//! - **pong**: The pong demo task

pub mod console;
pub mod pong;
pub mod process;
pub mod task;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use task::Scheduler;

/// Lock a mutex, carrying on with the data if another task panicked while holding it.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
