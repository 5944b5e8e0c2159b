use crate::event::InputEvent;

/// A source of discrete input events.
///
/// Debounce and hold/release handling are the implementation's concern; by the
/// time an event reaches the caller it is a single logical press.
pub trait InputSource {
    /// Return the next pending event, or `None` when nothing is buffered.
    fn poll_event(&mut self) -> Option<InputEvent>;
}
