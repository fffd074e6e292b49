//! Resource-keyed sound registry
//!
//! Multiplexes application-level sound events onto live clips. Ids index into
//! the manifest's fixed sound list; at most one clip exists per id, created
//! lazily on first use and kept for the registry's lifetime.
//!
//! The registry is an explicitly constructed, explicitly owned instance: the
//! host builds one, hands it the device and asset store, and passes it to
//! whatever needs sound playback. There is no global.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::assets::AssetStore;
use crate::clip::{PlaybackState, SoundClip};
use crate::device::{
    completion_channel, CompletionReceiver, CompletionSender, PlaybackDevice, PlaybackSession,
};
use crate::manifest::SoundManifest;

/// Registry of sound clips keyed by resource id.
///
/// Every playback entry point is best-effort: failures degrade to "this sound
/// does not play" and are logged, never surfaced to the caller.
pub struct SoundRegistry<D: PlaybackDevice> {
    device: D,
    manifest: SoundManifest,
    enabled: AtomicBool,
    completions_tx: CompletionSender,
    completions_rx: CompletionReceiver,
    inner: Mutex<Inner<D::Session>>,
}

struct Inner<S: PlaybackSession> {
    clips: HashMap<usize, SoundClip<S>>,
    store: Option<Arc<dyn AssetStore>>,
}

impl<D: PlaybackDevice> SoundRegistry<D> {
    pub fn new(device: D, manifest: SoundManifest) -> Self {
        let (completions_tx, completions_rx) = completion_channel();

        Self {
            device,
            manifest,
            enabled: AtomicBool::new(true),
            completions_tx,
            completions_rx,
            inner: Mutex::new(Inner {
                clips: HashMap::new(),
                store: None,
            }),
        }
    }

    /// Supply the resource-opening capability. Must happen before the first
    /// playback request; clips created without a store fail their setup and
    /// park in `Error`.
    pub fn set_asset_store(&self, store: Arc<dyn AssetStore>) {
        self.inner.lock().store = Some(store);
    }

    pub fn manifest(&self) -> &SoundManifest {
        &self.manifest
    }

    /// Begin playback of the sound with this id.
    ///
    /// Out-of-range ids are dropped here; nothing downstream ever sees them.
    pub fn start_sound(&self, id: usize, looping: bool) {
        if !self.is_enabled() {
            tracing::debug!("Sound disabled, ignoring start of id {}", id);
            return;
        }

        let Some(def) = self.manifest.get(id) else {
            tracing::debug!("start_sound called with unknown id {}", id);
            return;
        };

        let mut inner = self.inner.lock();
        let Inner { clips, store } = &mut *inner;

        let clip = clips
            .entry(id)
            .or_insert_with(|| SoundClip::new(def.clone(), self.completions_tx.clone()));
        clip.start(&self.device, store.as_deref(), looping);
    }

    /// Halt the sound with this id. Unknown or never-started ids are ignored;
    /// stopping never creates a clip.
    pub fn stop_sound(&self, id: usize) {
        let mut inner = self.inner.lock();
        if let Some(clip) = inner.clips.get_mut(&id) {
            clip.stop();
        }
    }

    /// Suspend every active clip. Each clip is state-guarded, so this is safe
    /// to call unconditionally on every host suspend event.
    pub fn pause_all_sounds(&self) {
        for clip in self.inner.lock().clips.values_mut() {
            clip.pause();
        }
    }

    /// Continue every paused clip; the counterpart of
    /// [`Self::pause_all_sounds`] for host resume events.
    pub fn resume_all_sounds(&self) {
        for clip in self.inner.lock().clips.values_mut() {
            clip.resume();
        }
    }

    /// Halt everything currently playing.
    pub fn stop_all_sounds(&self) {
        for clip in self.inner.lock().clips.values_mut() {
            clip.stop();
        }
        tracing::debug!("Stopped all sounds");
    }

    /// Drain pending device completion notifications and apply them.
    ///
    /// Completions arrive from the device's callback context; the host calls
    /// this from its control thread (once per tick is plenty), so state
    /// transitions never race public calls.
    pub fn process_completions(&self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            tracing::trace!("Completion for session {}", completion.token);

            let mut inner = self.inner.lock();
            for clip in inner.clips.values_mut() {
                if clip.handle_completion(completion.token) {
                    break;
                }
            }
        }
    }

    /// Open every manifest entry's data ahead of the first start.
    pub fn preload_all_sounds(&self) {
        let mut inner = self.inner.lock();
        let Inner { clips, store } = &mut *inner;

        let Some(store) = store else {
            tracing::warn!("Preload requested with no asset store configured");
            return;
        };

        for (id, def) in self.manifest.iter() {
            let clip = clips
                .entry(id)
                .or_insert_with(|| SoundClip::new(def.clone(), self.completions_tx.clone()));
            clip.preload(store.as_ref());
        }
    }

    /// Turn playback on or off. Disabling stops everything currently playing
    /// and gates further starts until re-enabled.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        if !enabled {
            self.stop_all_sounds();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Observable state of the clip for this id, if one exists yet.
    pub fn sound_state(&self, id: usize) -> Option<PlaybackState> {
        self.inner.lock().clips.get(&id).map(|clip| clip.state())
    }

    pub fn is_playing(&self, id: usize) -> bool {
        self.sound_state(id) == Some(PlaybackState::Started)
    }

    /// Number of clips created so far.
    pub fn clip_count(&self) -> usize {
        self.inner.lock().clips.len()
    }
}
