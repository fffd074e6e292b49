//! Sound-effect playback for interactive applications.
//!
//! Starts, stops, pauses, resumes and loops short named audio clips, with at
//! most one active player per sound and graceful recovery from playback-device
//! failures: a sound that cannot play degrades to silence, never to a crash.
//!
//! ## Architecture
//!
//! ```text
//! SoundRegistry
//!   ├── SoundClip (id 0) ── PlaybackSession ─┐
//!   ├── SoundClip (id 1) ── PlaybackSession ─┤ one session per clip,
//!   └── SoundClip (id n) ── PlaybackSession ─┘ reused across replays
//!
//! PlaybackDevice backends:
//!   ├── RodioDevice     (real audio output)
//!   └── HeadlessDevice  (no-op, for machines without audio)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use sfx_system::{DirAssetStore, RodioDevice, SoundManifest, SoundRegistry};
//!
//! let manifest = SoundManifest::load(Path::new("sounds.json"))?;
//! let registry = SoundRegistry::new(RodioDevice::try_default()?, manifest);
//! registry.set_asset_store(Arc::new(DirAssetStore::new("sounds")));
//!
//! registry.start_sound(0, false); // fire a one-shot effect
//! registry.start_sound(1, true);  // loop background ambiance
//!
//! // On every host tick:
//! registry.process_completions();
//!
//! // On host suspend / resume:
//! registry.pause_all_sounds();
//! registry.resume_all_sounds();
//! ```

pub mod assets;
pub mod clip;
pub mod device;
pub mod error;
pub mod manifest;
pub mod registry;

#[cfg(test)]
mod testing;

pub use assets::{AssetStore, DirAssetStore, MemoryAssetStore, SoundData};
pub use clip::{PlaybackState, SoundClip};
pub use device::headless::{HeadlessDevice, HeadlessSession};
pub use device::rodio::{RodioDevice, RodioSession};
pub use device::{
    completion_channel, Completion, CompletionReceiver, CompletionSender, PlaybackDevice,
    PlaybackSession, SessionToken,
};
pub use error::{AssetError, DeviceError, ManifestError, SfxResult};
pub use manifest::{SoundDef, SoundManifest};
pub use registry::SoundRegistry;
