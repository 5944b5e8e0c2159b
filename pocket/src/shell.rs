//! The concrete menu tree: main menu, game menu and settings, with the
//! bindings that launch games and talk to the audio task.

use std::cell::Cell;
use std::rc::Rc;

use pocket_core::audio::AudioCommand;
use pocket_core::console::Console;
use pocket_core::event::InputEvent;
use pocket_core::game::{Game, GameExit};
use pocket_core::menu::{Bindings, MenuDefinition, MenuPage, bind};
use pocket_games::{Breakout, Tetris};

/// Background tracks on the sound bank.
pub const TETRIS_TRACK: u8 = 99;
pub const BREAKOUT_TRACK: u8 = 41;

/// Attenuation ladder the Volume item cycles through, quietest first.
const VOLUME_STEPS: [i16; 5] = [-400, -200, -100, -40, 0];

/// Player-tunable state shared by the menu bindings.
///
/// One instance lives behind an `Rc`; every binding that needs it captures a
/// clone, so there is no ambient global.
#[derive(Debug)]
pub struct Settings {
    volume: Cell<i16>,
    repeat: Cell<bool>,
}

impl Settings {
    pub fn new(volume: i16, repeat: bool) -> Rc<Self> {
        Rc::new(Self {
            volume: Cell::new(volume),
            repeat: Cell::new(repeat),
        })
    }

    pub fn volume(&self) -> i16 {
        self.volume.get()
    }

    pub fn repeat(&self) -> bool {
        self.repeat.get()
    }

    /// Next stop on the ladder, wrapping after full scale.
    fn cycle_volume(&self) -> i16 {
        let current = self.volume.get();
        let next = VOLUME_STEPS
            .iter()
            .position(|&step| step == current)
            .map_or(VOLUME_STEPS[0], |i| {
                VOLUME_STEPS[(i + 1) % VOLUME_STEPS.len()]
            });
        self.volume.set(next);
        next
    }

    fn toggle_repeat(&self) -> bool {
        let next = !self.repeat.get();
        self.repeat.set(next);
        next
    }
}

/// Send the startup audio state and show the main menu.
pub fn boot(console: &mut Console, settings: &Rc<Settings>) {
    console
        .audio()
        .notify(AudioCommand::SetVolume(settings.volume()));
    console
        .audio()
        .notify(AudioCommand::SetRepeat(settings.repeat()));
    install(console, main_menu(settings));
}

/// Route one event from the outer poll loop; returns false on quit.
pub fn dispatch(console: &mut Console, settings: &Rc<Settings>, event: InputEvent) -> bool {
    match event {
        InputEvent::Quit => {
            log::info!("shutting down");
            false
        }
        // Joystick left backs all the way out to the main menu.
        InputEvent::Back | InputEvent::Left => {
            install(console, main_menu(settings));
            true
        }
        _ => {
            console.handle_event(event);
            true
        }
    }
}

fn install(console: &mut Console, page: MenuPage) {
    if let Err(e) = console.install_page(page) {
        log::error!("menu install failed: {e}");
    }
}

fn definition(labels: &[String]) -> MenuDefinition {
    // The builders below always pass a title plus at least one item.
    MenuDefinition::new(labels.iter().cloned()).unwrap_or_else(|e| {
        unreachable!("shell menu definitions are statically well-formed: {e}")
    })
}

pub fn main_menu(settings: &Rc<Settings>) -> MenuPage {
    let games = {
        let settings = Rc::clone(settings);
        bind(move |console| install(console, game_menu(&settings)))
    };
    let open_settings = {
        let settings = Rc::clone(settings);
        bind(move |console| install(console, settings_menu(&settings)))
    };
    MenuPage::new(
        definition(&[
            "Main Menu".to_string(),
            "Games".to_string(),
            "Settings".to_string(),
        ]),
        Bindings::new(vec![None, games, open_settings]),
    )
}

fn game_menu(settings: &Rc<Settings>) -> MenuPage {
    // Back re-installs the parent explicitly; there is no menu stack.
    let parent = main_menu(settings);
    let back = {
        let parent = parent.clone();
        bind(move |console| install(console, parent.clone()))
    };
    let tetris = {
        let settings = Rc::clone(settings);
        bind(move |console| {
            play(console, TETRIS_TRACK, &mut Tetris::new());
            install(console, main_menu(&settings));
        })
    };
    let breakout = {
        let settings = Rc::clone(settings);
        bind(move |console| {
            play(console, BREAKOUT_TRACK, &mut Breakout::new());
            install(console, main_menu(&settings));
        })
    };
    MenuPage::new(
        definition(&[
            "Game Menu".to_string(),
            "Tetris".to_string(),
            "Breakout".to_string(),
            "Back".to_string(),
        ]),
        Bindings::new(vec![None, tetris, breakout, back]),
    )
}

fn settings_menu(settings: &Rc<Settings>) -> MenuPage {
    let parent = main_menu(settings);
    let back = {
        let parent = parent.clone();
        bind(move |console| install(console, parent.clone()))
    };
    let volume = {
        let settings = Rc::clone(settings);
        bind(move |console| {
            let next = settings.cycle_volume();
            console.audio().notify(AudioCommand::SetVolume(next));
            // Re-install so the label shows the new value.
            install(console, settings_menu(&settings));
        })
    };
    let repeat = {
        let settings = Rc::clone(settings);
        bind(move |console| {
            let next = settings.toggle_repeat();
            console.audio().notify(AudioCommand::SetRepeat(next));
            install(console, settings_menu(&settings));
        })
    };
    MenuPage::new(
        definition(&[
            "Settings".to_string(),
            format!("Volume  {:>4}", settings.volume()),
            format!("Repeat  {}", if settings.repeat() { "on" } else { "off" }),
            "Back".to_string(),
        ]),
        Bindings::new(vec![None, volume, repeat, back]),
    )
}

/// Run a game with the background track playing, then stop it.
///
/// Blocks until the session ends; the navigator is frozen the whole time and
/// any input during the session belongs to the game.
fn play(console: &mut Console, track: u8, game: &mut dyn Game) {
    log::info!("starting {}", game.title());
    console.audio().notify(AudioCommand::PlayTrack(track));
    let exit = {
        let (input, screen) = console.io_mut();
        game.run(input, screen)
    };
    console.audio().notify(AudioCommand::StopTrack);
    match exit {
        GameExit::Quit => log::info!("{} quit", game.title()),
        GameExit::GameOver { score } => log::info!("{} finished, score {score}", game.title()),
    }
}
