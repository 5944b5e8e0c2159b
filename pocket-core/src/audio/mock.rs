use std::cell::RefCell;

use super::provider::{AudioCommand, AudioSink};

/// Test sink that records every command it receives.
#[derive(Debug, Default)]
pub struct MockAudioSink {
    pub commands: RefCell<Vec<AudioCommand>>,
}

impl MockAudioSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<AudioCommand> {
        self.commands.borrow().clone()
    }
}

impl AudioSink for MockAudioSink {
    fn notify(&self, command: AudioCommand) {
        self.commands.borrow_mut().push(command);
    }
}
