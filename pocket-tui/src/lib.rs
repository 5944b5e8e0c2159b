pub mod input;
pub mod screen;
pub mod theme;

pub use input::TerminalInput;
pub use screen::TerminalScreen;
pub use theme::Theme;
