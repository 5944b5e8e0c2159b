/// One-way commands for the audio task.
///
/// Volume is an attenuation in tenths of a dB (0 = full scale, negative
/// values quieter), matching the player hardware's convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    PlayTrack(u8),
    StopTrack,
    SetVolume(i16),
    SetRepeat(bool),
}

/// Fire-and-forget sink for audio commands.
///
/// Delivery is best-effort: no acknowledgment, no ordering guarantee relative
/// to anything the caller does afterwards, and a dead receiver is not an
/// error.
pub trait AudioSink {
    fn notify(&self, command: AudioCommand);
}
