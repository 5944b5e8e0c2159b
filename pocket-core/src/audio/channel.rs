use std::sync::mpsc::Sender;

use super::provider::{AudioCommand, AudioSink};

/// Sink that forwards commands to a player task over an mpsc channel.
///
/// If the player has gone away the command is dropped, per the best-effort
/// contract.
#[derive(Debug, Clone)]
pub struct ChannelAudioSink {
    tx: Sender<AudioCommand>,
}

impl ChannelAudioSink {
    pub fn new(tx: Sender<AudioCommand>) -> Self {
        Self { tx }
    }
}

impl AudioSink for ChannelAudioSink {
    fn notify(&self, command: AudioCommand) {
        if self.tx.send(command).is_err() {
            log::debug!("audio task gone, dropped {command:?}");
        }
    }
}
