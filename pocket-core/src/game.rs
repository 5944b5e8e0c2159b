use crate::input::InputSource;
use crate::screen::Screen;

/// How a game session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameExit {
    /// The player backed out.
    Quit,
    GameOver { score: u32 },
}

/// A full-screen game session.
///
/// `run` blocks until the session ends and has exclusive use of the input
/// source and screen for its whole duration; events it consumes are never
/// seen by the menu.
pub trait Game {
    fn title(&self) -> &str;

    fn run(&mut self, input: &mut dyn InputSource, screen: &mut dyn Screen) -> GameExit;
}
