mod rolling;
mod types;

pub use rolling::{RollingWindow, DEFAULT_WINDOW_CAPACITY};
pub use types::{Sample, WindowStats};
