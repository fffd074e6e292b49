//! Test doubles for the playback stack.
//!
//! The real backend needs audio hardware, so unit tests run against a
//! scripted device that records every operation and can be told to fail.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::assets::{MemoryAssetStore, SoundData};
use crate::device::{
    Completion, CompletionSender, PlaybackDevice, PlaybackSession, SessionToken,
};
use crate::error::DeviceError;
use crate::manifest::{SoundDef, SoundManifest};

#[derive(Default)]
struct FakeState {
    ops: Vec<String>,
    sessions: Vec<FakeBinding>,
    fail_bind: bool,
    fail_prepare: bool,
}

struct FakeBinding {
    token: SessionToken,
    completions: CompletionSender,
    looping: bool,
}

/// Scripted playback device. Clones share one recording, so tests keep a
/// clone around after moving the device into a registry.
#[derive(Clone, Default)]
pub struct FakeDevice(Arc<Mutex<FakeState>>);

impl FakeDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_bind(&self, fail: bool) {
        self.0.lock().fail_bind = fail;
    }

    pub fn fail_prepare(&self, fail: bool) {
        self.0.lock().fail_prepare = fail;
    }

    /// Every session operation performed so far, in order.
    pub fn ops(&self) -> Vec<String> {
        self.0.lock().ops.clone()
    }

    /// Token of the most recently bound session.
    pub fn last_token(&self) -> SessionToken {
        self.0
            .lock()
            .sessions
            .last()
            .expect("no session bound")
            .token
    }

    /// Simulate the session reaching its natural end. A looping session never
    /// reports completion; the device loops internally.
    pub fn finish(&self, token: SessionToken) {
        let state = self.0.lock();
        let Some(binding) = state.sessions.iter().find(|b| b.token == token) else {
            return;
        };
        if binding.looping {
            return;
        }
        let _ = binding.completions.try_send(Completion { token });
    }
}

impl PlaybackDevice for FakeDevice {
    type Session = FakeSession;

    fn bind(
        &self,
        _data: &SoundData,
        completions: CompletionSender,
    ) -> Result<FakeSession, DeviceError> {
        let mut state = self.0.lock();
        if state.fail_bind {
            return Err(DeviceError::BindFailed("scripted bind failure".into()));
        }

        let token = SessionToken::next();
        state.ops.push("bind".into());
        state.sessions.push(FakeBinding {
            token,
            completions,
            looping: false,
        });

        Ok(FakeSession {
            token,
            shared: self.clone(),
        })
    }
}

pub struct FakeSession {
    token: SessionToken,
    shared: FakeDevice,
}

impl FakeSession {
    fn record(&self, op: &str) {
        self.shared.0.lock().ops.push(op.into());
    }
}

impl PlaybackSession for FakeSession {
    fn token(&self) -> SessionToken {
        self.token
    }

    fn prepare(&mut self) -> Result<(), DeviceError> {
        let fail = self.shared.0.lock().fail_prepare;
        if fail {
            return Err(DeviceError::PrepareFailed("scripted prepare failure".into()));
        }
        self.record("prepare");
        Ok(())
    }

    fn set_looping(&mut self, looping: bool) {
        let mut state = self.shared.0.lock();
        state.ops.push(format!("set_looping({})", looping));
        if let Some(binding) = state.sessions.iter_mut().find(|b| b.token == self.token) {
            binding.looping = looping;
        }
    }

    fn start(&mut self) {
        self.record("start");
    }

    fn stop(&mut self) {
        self.record("stop");
    }

    fn pause(&mut self) {
        self.record("pause");
    }

    fn resume(&mut self) {
        self.record("resume");
    }
}

/// Manifest with one entry per name, `<name>.wav` as the file.
pub fn test_manifest(names: &[&str]) -> SoundManifest {
    SoundManifest::new(
        names
            .iter()
            .map(|name| SoundDef::new(*name, format!("{}.wav", name)))
            .collect(),
    )
}

/// In-memory store with a dummy payload for each listed file.
pub fn test_store(files: &[&str]) -> Arc<MemoryAssetStore> {
    let mut store = MemoryAssetStore::new();
    for file in files {
        store.insert(*file, vec![0u8; 64]);
    }
    Arc::new(store)
}
