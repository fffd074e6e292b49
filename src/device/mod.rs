//! Playback device abstraction
//!
//! A [`PlaybackDevice`] hands out one [`PlaybackSession`] per clip: a live
//! handle to the audio output bound to that clip's decoded data. Sessions are
//! acquired with [`PlaybackDevice::bind`], made output-ready with
//! [`PlaybackSession::prepare`], and released by dropping them.
//!
//! Natural end-of-playback is reported from the device's own callback
//! context, so it travels a channel rather than touching clip state directly:
//! each session is handed a [`CompletionSender`] at bind time and posts a
//! [`Completion`] carrying its [`SessionToken`] when a non-looping play runs
//! out. The control thread drains the receiving side (see
//! `SoundRegistry::process_completions`), which keeps every state change on
//! one thread.

pub mod headless;
pub mod rodio;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::assets::SoundData;
use crate::error::DeviceError;

/// Identity token for one device session.
///
/// Completion notifications carry the token of the session they belong to; a
/// token from a released session never compares equal to a live one, so stale
/// notifications are cheap to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(u64);

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

impl SessionToken {
    /// Allocate a fresh, process-unique token.
    pub fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Natural end-of-playback notification from the device.
#[derive(Debug, Clone, Copy)]
pub struct Completion {
    pub token: SessionToken,
}

pub type CompletionSender = crossbeam_channel::Sender<Completion>;
pub type CompletionReceiver = crossbeam_channel::Receiver<Completion>;

/// Create the channel completions travel on, device side to control side.
pub fn completion_channel() -> (CompletionSender, CompletionReceiver) {
    crossbeam_channel::unbounded()
}

/// An audio output capable of binding sessions to sound data.
pub trait PlaybackDevice {
    type Session: PlaybackSession;

    /// Acquire a new session bound to one sound's encoded data.
    fn bind(
        &self,
        data: &SoundData,
        completions: CompletionSender,
    ) -> Result<Self::Session, DeviceError>;
}

/// A live playback session. Release is `Drop`.
pub trait PlaybackSession {
    fn token(&self) -> SessionToken;

    /// Make the session output-ready. Required before the first `start` and
    /// again after every `stop`.
    fn prepare(&mut self) -> Result<(), DeviceError>;

    /// Set the loop flag for the next `start`. A looping session never posts
    /// a completion; the device loops internally.
    fn set_looping(&mut self, looping: bool);

    /// Begin playback from the start of the sound.
    fn start(&mut self);

    /// Halt playback.
    fn stop(&mut self);

    /// Suspend playback, keeping position.
    fn pause(&mut self);

    /// Continue a paused session.
    fn resume(&mut self);
}
