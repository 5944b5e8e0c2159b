use std::thread;
use std::time::{Duration, Instant};

use pocket_core::event::InputEvent;
use pocket_core::input::InputSource;
use pocket_core::screen::{RowStyle, Screen};

const POLL_SLEEP: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntroOutcome {
    Start,
    Abort,
}

/// Show a title card and wait for the player to press start.
///
/// The deadline keeps an idle console moving: when it passes, the game starts
/// on its own.
pub(crate) fn wait_for_start(
    title: &str,
    hint: &str,
    input: &mut dyn InputSource,
    screen: &mut dyn Screen,
    deadline: Duration,
) -> IntroOutcome {
    screen.clear();
    screen.draw_row(0, title, RowStyle::Title);
    screen.draw_row(2, hint, RowStyle::Normal);
    screen.draw_row(4, "press start", RowStyle::Highlighted);

    let started = Instant::now();
    loop {
        while let Some(event) = input.poll_event() {
            match event {
                InputEvent::Select | InputEvent::Right => return IntroOutcome::Start,
                InputEvent::Back | InputEvent::Left | InputEvent::Quit => {
                    return IntroOutcome::Abort;
                }
                InputEvent::Up | InputEvent::Down => {}
            }
        }
        if started.elapsed() >= deadline {
            return IntroOutcome::Start;
        }
        thread::sleep(POLL_SLEEP);
    }
}
