use std::rc::Rc;

use crate::audio::AudioSink;
use crate::error::MenuError;
use crate::event::InputEvent;
use crate::input::InputSource;
use crate::menu::{Bindings, MenuDefinition, MenuPage};
use crate::navigator::Navigator;
use crate::screen::Screen;

/// The assembled device: input, screen and audio behind their trait seams,
/// plus the menu navigator.
///
/// Single-threaded and cooperative. One outer loop polls input and feeds
/// events here; a binding may block for an entire game session, during which
/// the navigator is frozen and no events are queued on its behalf.
pub struct Console {
    input: Box<dyn InputSource>,
    screen: Box<dyn Screen>,
    audio: Rc<dyn AudioSink>,
    navigator: Navigator,
}

impl Console {
    pub fn new(
        input: Box<dyn InputSource>,
        screen: Box<dyn Screen>,
        audio: Rc<dyn AudioSink>,
        visible_rows: usize,
    ) -> Self {
        Self {
            input,
            screen,
            audio,
            navigator: Navigator::new(visible_rows),
        }
    }

    /// Replace the active menu; see [`Navigator::install`].
    pub fn install_menu(
        &mut self,
        definition: MenuDefinition,
        bindings: Bindings,
    ) -> Result<(), MenuError> {
        self.navigator
            .install(definition, bindings, &mut *self.screen)
    }

    pub fn install_page(&mut self, page: MenuPage) -> Result<(), MenuError> {
        self.install_menu(page.definition, page.bindings)
    }

    /// Feed one event to the menu.
    ///
    /// `Right` selects, matching the joystick layout (push right to enter).
    /// `Left`, `Back` and `Quit` are deliberately ignored here: what "home"
    /// or "exit" means belongs to the outer shell.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Up => self.navigator.move_up(&mut *self.screen),
            InputEvent::Down => self.navigator.move_down(&mut *self.screen),
            InputEvent::Select | InputEvent::Right => self.handle_select(),
            InputEvent::Left | InputEvent::Back | InputEvent::Quit => {}
        }
    }

    /// Invoke the binding under the cursor.
    ///
    /// An unbound selection is a silent no-op: no state change, no redraw.
    /// The binding runs synchronously with full access to the console, so it
    /// may install another menu or run a game to completion before this
    /// returns.
    pub fn handle_select(&mut self) {
        let Some(binding) = self.navigator.selected_binding() else {
            return;
        };
        binding(self);
    }

    pub fn poll_input(&mut self) -> Option<InputEvent> {
        self.input.poll_event()
    }

    pub fn audio(&self) -> &dyn AudioSink {
        &*self.audio
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Borrow the input source and screen together, for handing both to a
    /// game session.
    pub fn io_mut(&mut self) -> (&mut dyn InputSource, &mut dyn Screen) {
        (&mut *self.input, &mut *self.screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioCommand, MockAudioSink};
    use crate::input::ScriptedInput;
    use crate::menu::bind;
    use crate::screen::{RecordingScreen, ScreenOp};
    use std::cell::{Cell, RefCell};

    struct Harness {
        console: Console,
        screen: Rc<RefCell<RecordingScreen>>,
        audio: Rc<MockAudioSink>,
    }

    fn harness() -> Harness {
        let screen = Rc::new(RefCell::new(RecordingScreen::new()));
        let audio = Rc::new(MockAudioSink::new());
        let console = Console::new(
            Box::new(ScriptedInput::default()),
            Box::new(Rc::clone(&screen)),
            Rc::clone(&audio) as Rc<dyn AudioSink>,
            7,
        );
        Harness {
            console,
            screen,
            audio,
        }
    }

    fn definition(title: &str, items: &[&str]) -> MenuDefinition {
        let mut labels = vec![title.to_string()];
        labels.extend(items.iter().map(ToString::to_string));
        MenuDefinition::new(labels).unwrap()
    }

    #[test]
    fn select_invokes_binding_by_index() {
        let mut h = harness();
        let hits = Rc::new(Cell::new(0));
        let counted = Rc::clone(&hits);
        h.console
            .install_menu(
                definition("Main Menu", &["Games", "Settings"]),
                Bindings::new(vec![
                    None,
                    bind(move |_| counted.set(counted.get() + 1)),
                    None,
                ]),
            )
            .unwrap();

        h.console.handle_event(InputEvent::Select);
        assert_eq!(hits.get(), 1);

        // Index 2 is unbound: selecting it changes nothing.
        h.console.handle_event(InputEvent::Down);
        h.console.handle_event(InputEvent::Select);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn right_selects_like_the_joystick() {
        let mut h = harness();
        let hits = Rc::new(Cell::new(0));
        let counted = Rc::clone(&hits);
        h.console
            .install_menu(
                definition("Main Menu", &["Games"]),
                Bindings::new(vec![None, bind(move |_| counted.set(counted.get() + 1))]),
            )
            .unwrap();

        h.console.handle_event(InputEvent::Right);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn binding_can_install_a_submenu() {
        let mut h = harness();
        let submenu = bind(|console: &mut Console| {
            let result = console.install_menu(
                definition("Game Menu", &["Tetris", "Breakout", "Back"]),
                Bindings::new(vec![None, None, None, None]),
            );
            assert!(result.is_ok());
        });
        h.console
            .install_menu(
                definition("Main Menu", &["Games"]),
                Bindings::new(vec![None, submenu]),
            )
            .unwrap();

        h.console.handle_select();

        // Subsequent moves operate on the new menu's bounds, not the old
        // single-item menu's.
        assert_eq!(h.console.navigator().selected_index(), Some(1));
        for _ in 0..3 {
            h.console.handle_event(InputEvent::Down);
        }
        assert_eq!(h.console.navigator().selected_index(), Some(1));
    }

    #[test]
    fn unbound_select_is_a_silent_noop() {
        let mut h = harness();
        h.console
            .install_menu(
                definition("Main Menu", &["Games"]),
                Bindings::new(vec![None, None]),
            )
            .unwrap();
        h.screen.borrow_mut().take_ops();

        h.console.handle_select();

        assert_eq!(h.console.navigator().selected_index(), Some(1));
        assert_eq!(h.console.navigator().page_start(), Some(1));
        assert!(h.screen.borrow_mut().take_ops().is_empty());
    }

    #[test]
    fn bindings_reach_the_audio_sink() {
        let mut h = harness();
        h.console
            .install_menu(
                definition("Main Menu", &["Beep"]),
                Bindings::new(vec![
                    None,
                    bind(|console: &mut Console| {
                        console.audio().notify(AudioCommand::PlayTrack(41));
                    }),
                ]),
            )
            .unwrap();

        h.console.handle_select();
        assert_eq!(h.audio.received(), vec![AudioCommand::PlayTrack(41)]);
    }

    #[test]
    fn left_back_and_quit_are_ignored_by_the_menu() {
        let mut h = harness();
        h.console
            .install_menu(
                definition("Main Menu", &["Games", "Settings"]),
                Bindings::new(vec![None, None, None]),
            )
            .unwrap();
        h.screen.borrow_mut().take_ops();

        for event in [InputEvent::Left, InputEvent::Back, InputEvent::Quit] {
            h.console.handle_event(event);
            assert_eq!(h.console.navigator().selected_index(), Some(1));
        }
        assert!(h.screen.borrow_mut().take_ops().is_empty());
    }

    #[test]
    fn install_page_keeps_definition_and_bindings_together() {
        let mut h = harness();
        let page = MenuPage::new(
            definition("Settings", &["Volume", "Back"]),
            Bindings::new(vec![None, None, None]),
        );
        h.console.install_page(page).unwrap();

        let ops = h.screen.borrow_mut().take_ops();
        assert_eq!(ops[0], ScreenOp::Clear);
        assert_eq!(
            ops[1],
            ScreenOp::Row {
                row: 0,
                text: "Settings".to_string(),
                style: crate::screen::RowStyle::Title,
            }
        );
    }
}
