pub mod create_window;
pub mod finder_window;

pub use create_window::{CreateAction, CreateWindowState};
pub use finder_window::{FinderAction, FinderWindowState};
