//! Headless playback backend
//!
//! Accepts every operation and produces no audio. Keeps the system running in
//! environments without an output device (CI machines, servers, builds with
//! sound disabled). Headless sessions never post completions; a "playing"
//! sound simply stays silent until stopped.

use crate::assets::SoundData;
use crate::device::{CompletionSender, PlaybackDevice, PlaybackSession, SessionToken};
use crate::error::DeviceError;

#[derive(Debug, Default)]
pub struct HeadlessDevice;

impl HeadlessDevice {
    pub fn new() -> Self {
        Self
    }
}

impl PlaybackDevice for HeadlessDevice {
    type Session = HeadlessSession;

    fn bind(
        &self,
        _data: &SoundData,
        _completions: CompletionSender,
    ) -> Result<HeadlessSession, DeviceError> {
        Ok(HeadlessSession {
            token: SessionToken::next(),
        })
    }
}

#[derive(Debug)]
pub struct HeadlessSession {
    token: SessionToken,
}

impl PlaybackSession for HeadlessSession {
    fn token(&self) -> SessionToken {
        self.token
    }

    fn prepare(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    fn set_looping(&mut self, _looping: bool) {}

    fn start(&mut self) {}

    fn stop(&mut self) {}

    fn pause(&mut self) {}

    fn resume(&mut self) {}
}
