//! Per-sound playback state machine
//!
//! A [`SoundClip`] owns one playable sound resource and at most one live
//! device session. Clips are created on the first request for their sound id
//! and reused across start/stop cycles; they are only dropped when the
//! registry itself is torn down.
//!
//! Every transition is a match arm over the state sum type. The session lives
//! inside the `Started`/`Stopped`/`Paused` variants, so "session present iff
//! started, stopped or paused" holds by construction. `Error` is terminal:
//! once setup fails, every later call on the clip is ignored and the sound
//! simply never plays.

use std::fmt;
use std::mem;

use crate::assets::{AssetStore, SoundData};
use crate::device::{CompletionSender, PlaybackDevice, PlaybackSession, SessionToken};
use crate::manifest::SoundDef;

/// Externally observable playback state of a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Started,
    Stopped,
    Paused,
    Error,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "Idle"),
            PlaybackState::Started => write!(f, "Started"),
            PlaybackState::Stopped => write!(f, "Stopped"),
            PlaybackState::Paused => write!(f, "Paused"),
            PlaybackState::Error => write!(f, "Error"),
        }
    }
}

enum ClipState<S> {
    Idle,
    Started(S),
    Stopped(S),
    Paused(S),
    Error,
}

impl<S> ClipState<S> {
    fn observed(&self) -> PlaybackState {
        match self {
            ClipState::Idle => PlaybackState::Idle,
            ClipState::Started(_) => PlaybackState::Started,
            ClipState::Stopped(_) => PlaybackState::Stopped,
            ClipState::Paused(_) => PlaybackState::Paused,
            ClipState::Error => PlaybackState::Error,
        }
    }
}

/// One playable sound resource plus its playback state machine.
pub struct SoundClip<S: PlaybackSession> {
    def: SoundDef,
    data: Option<SoundData>,
    state: ClipState<S>,
    completions: CompletionSender,
}

impl<S: PlaybackSession> SoundClip<S> {
    pub(crate) fn new(def: SoundDef, completions: CompletionSender) -> Self {
        Self {
            def,
            data: None,
            state: ClipState::Idle,
            completions,
        }
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn state(&self) -> PlaybackState {
        self.state.observed()
    }

    /// Begin playback.
    ///
    /// From `Idle` this opens the sound's data and binds a fresh device
    /// session; from `Stopped` the existing session is prepared again. Any
    /// setup failure parks the clip in `Error`, where it stays: a sound that
    /// cannot play degrades to silence instead of taking the caller down.
    /// Calling start while already playing is tolerated and logged.
    pub fn start<D>(&mut self, device: &D, assets: Option<&dyn AssetStore>, looping: bool)
    where
        D: PlaybackDevice<Session = S>,
    {
        self.state = match mem::replace(&mut self.state, ClipState::Error) {
            ClipState::Idle => match self.bind_session(device, assets) {
                Some(mut session) => match session.prepare() {
                    Ok(()) => Self::begin(session, looping, &self.def.name),
                    Err(e) => {
                        tracing::warn!("Failed to prepare {}: {}", self.def.name, e);
                        ClipState::Error
                    }
                },
                None => ClipState::Error,
            },
            // Some devices require a state reset before replay; always
            // re-prepare rather than reuse the previous prepared state.
            ClipState::Stopped(mut session) => match session.prepare() {
                Ok(()) => Self::begin(session, looping, &self.def.name),
                Err(e) => {
                    tracing::warn!("Failed to re-prepare {}: {}", self.def.name, e);
                    ClipState::Error
                }
            },
            other => {
                tracing::debug!(
                    "start called for {} in state {}",
                    self.def.name,
                    other.observed()
                );
                other
            }
        };
    }

    /// Halt playback. Meaningful only while started; anything else is logged
    /// and left alone.
    pub fn stop(&mut self) {
        self.state = match mem::replace(&mut self.state, ClipState::Error) {
            ClipState::Started(mut session) => {
                session.stop();
                tracing::debug!("Stopped {}", self.def.name);
                ClipState::Stopped(session)
            }
            other => {
                tracing::debug!(
                    "stop called for {} in state {}",
                    self.def.name,
                    other.observed()
                );
                other
            }
        };
    }

    /// Suspend playback. Redundant calls are silently tolerated, so lifecycle
    /// code can pause everything without checking states first.
    pub fn pause(&mut self) {
        self.state = match mem::replace(&mut self.state, ClipState::Error) {
            ClipState::Started(mut session) => {
                session.pause();
                ClipState::Paused(session)
            }
            other => other,
        };
    }

    /// Continue a paused clip. Silently tolerant, like [`Self::pause`].
    pub fn resume(&mut self) {
        self.state = match mem::replace(&mut self.state, ClipState::Error) {
            ClipState::Paused(mut session) => {
                session.resume();
                ClipState::Started(session)
            }
            other => other,
        };
    }

    /// Apply a natural end-of-playback notification.
    ///
    /// Honored only while started and only when `token` identifies the live
    /// session; anything else is a stale notification and is dropped without
    /// touching state. Returns true when the notification was consumed.
    pub fn handle_completion(&mut self, token: SessionToken) -> bool {
        let mut handled = false;
        self.state = match mem::replace(&mut self.state, ClipState::Error) {
            ClipState::Started(mut session) if session.token() == token => {
                session.stop();
                handled = true;
                tracing::debug!("{} finished playing", self.def.name);
                ClipState::Stopped(session)
            }
            other => other,
        };
        handled
    }

    /// Open and cache the sound's data ahead of the first start. An asset
    /// that cannot be opened parks the clip in `Error`, the same outcome the
    /// first start would have produced.
    pub(crate) fn preload(&mut self, assets: &dyn AssetStore) {
        if !matches!(self.state, ClipState::Idle) || self.data.is_some() {
            return;
        }

        match assets.open(&self.def.file) {
            Ok(data) => self.data = Some(data),
            Err(e) => {
                tracing::warn!("Failed to preload {}: {}", self.def.file, e);
                self.state = ClipState::Error;
            }
        }
    }

    fn begin(mut session: S, looping: bool, name: &str) -> ClipState<S> {
        session.set_looping(looping);
        session.start();
        tracing::info!("Playing {} (loop={})", name, looping);
        ClipState::Started(session)
    }

    fn bind_session<D>(&mut self, device: &D, assets: Option<&dyn AssetStore>) -> Option<S>
    where
        D: PlaybackDevice<Session = S>,
    {
        let data = match &self.data {
            Some(data) => data.clone(),
            None => {
                let Some(assets) = assets else {
                    tracing::warn!("No asset store configured, cannot open {}", self.def.file);
                    return None;
                };

                match assets.open(&self.def.file) {
                    Ok(data) => {
                        self.data = Some(data.clone());
                        data
                    }
                    Err(e) => {
                        tracing::warn!("Failed to open {}: {}", self.def.file, e);
                        return None;
                    }
                }
            }
        };

        match device.bind(&data, self.completions.clone()) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Failed to bind session for {}: {}", self.def.name, e);
                None
            }
        }
    }
}
