/// Discrete input events produced by an [`crate::input::InputSource`].
///
/// The menu only consumes `Up`, `Down` and `Select` (plus `Right`, which the
/// joystick layout treats as select); `Left` and `Back` are handled
/// by the outer shell as "return home", and `Left`/`Right` drive the games.
/// `Quit` exists so a hosted build has an exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Select,
    Back,
    Quit,
}
