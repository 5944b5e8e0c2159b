mod mock;
mod provider;

pub use mock::{RecordingScreen, ScreenOp};
pub use provider::{RowStyle, Screen};
