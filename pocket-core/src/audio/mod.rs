mod channel;
mod mock;
mod provider;

pub use channel::ChannelAudioSink;
pub use mock::MockAudioSink;
pub use provider::{AudioCommand, AudioSink};
