pub mod audio;
pub mod config;
pub mod console;
pub mod error;
pub mod event;
pub mod game;
pub mod input;
pub mod menu;
pub mod navigator;
pub mod screen;

// Re-export commonly used types at crate root
pub use audio::{AudioCommand, AudioSink, ChannelAudioSink};
pub use config::Config;
pub use console::Console;
pub use error::MenuError;
pub use event::InputEvent;
pub use game::{Game, GameExit};
pub use input::InputSource;
pub use menu::{Binding, Bindings, MenuDefinition, MenuPage};
pub use navigator::Navigator;
pub use screen::{RowStyle, Screen};
