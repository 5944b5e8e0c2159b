//! The audio player task.
//!
//! Menu and game bindings post [`AudioCommand`]s over a channel and never
//! wait for an answer; this thread drains the queue, keeps the player state
//! and logs what a real mixer would do. Synthesis itself is out of scope.

use std::sync::mpsc;
use std::thread;

use pocket_core::audio::{AudioCommand, ChannelAudioSink};

/// Join handle wrapper; the thread exits once every sink clone is gone.
pub struct AudioTask {
    thread: Option<thread::JoinHandle<()>>,
}

/// Spawn the player and hand back the sink to feed it.
pub fn spawn() -> (ChannelAudioSink, AudioTask) {
    let (tx, rx) = mpsc::channel::<AudioCommand>();
    let thread = thread::spawn(move || {
        let mut player = Player::default();
        while let Ok(command) = rx.recv() {
            player.apply(command);
        }
        log::debug!("audio task draining done");
    });
    (
        ChannelAudioSink::new(tx),
        AudioTask {
            thread: Some(thread),
        },
    )
}

impl Drop for AudioTask {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            log::warn!("audio task panicked");
        }
    }
}

/// Current playback state.
#[derive(Debug, Default, PartialEq, Eq)]
struct Player {
    track: Option<u8>,
    volume: i16,
    repeat: bool,
}

impl Player {
    fn apply(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::PlayTrack(track) => {
                if self.track.replace(track) != Some(track) {
                    log::info!("audio: play track {track} at {} dB/10", self.volume);
                }
            }
            AudioCommand::StopTrack => {
                if let Some(track) = self.track.take() {
                    log::info!("audio: stop track {track}");
                }
            }
            AudioCommand::SetVolume(volume) => {
                self.volume = volume;
                log::debug!("audio: volume {volume} dB/10");
            }
            AudioCommand::SetRepeat(repeat) => {
                self.repeat = repeat;
                log::debug!("audio: repeat {repeat}");
            }
        }
    }
}
