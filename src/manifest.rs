//! Sound manifest
//!
//! The externally-defined, fixed list of sound resources. A sound's id is its
//! position in the list; ids are stable for the application's lifetime.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

/// One entry in the sound list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundDef {
    /// Human-readable name, used in diagnostics.
    pub name: String,

    /// File name resolved through the asset store.
    pub file: String,
}

impl SoundDef {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }
}

/// The fixed sound list, loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoundManifest {
    sounds: Vec<SoundDef>,
}

impl SoundManifest {
    pub fn new(sounds: Vec<SoundDef>) -> Self {
        Self { sounds }
    }

    /// Load the manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        let manifest = Self::from_json(&text)?;
        tracing::info!(
            "Loaded sound manifest from {} ({} sounds)",
            path.display(),
            manifest.len()
        );
        Ok(manifest)
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_json::from_str(text).map_err(ManifestError::ParseFailed)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), ManifestError> {
        for (id, def) in self.iter() {
            if def.name.is_empty() {
                return Err(ManifestError::Invalid(format!("sound {} has an empty name", id)));
            }
            if def.file.is_empty() {
                return Err(ManifestError::Invalid(format!(
                    "sound {} ({}) has an empty file",
                    id, def.name
                )));
            }
        }
        Ok(())
    }

    /// Look up a sound by id. Out-of-range ids resolve to nothing.
    pub fn get(&self, id: usize) -> Option<&SoundDef> {
        self.sounds.get(id)
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    /// Iterate entries together with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &SoundDef)> {
        self.sounds.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_from_json() {
        let manifest = SoundManifest::from_json(
            r#"{
                "sounds": [
                    { "name": "menu_select", "file": "menu_select.wav" },
                    { "name": "game_over", "file": "game_over.wav" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.get(0).unwrap().name, "menu_select");
        assert_eq!(manifest.get(1).unwrap().file, "game_over.wav");
        assert!(manifest.get(2).is_none());
    }

    #[test]
    fn test_manifest_rejects_bad_json() {
        assert!(matches!(
            SoundManifest::from_json("{ not json"),
            Err(ManifestError::ParseFailed(_))
        ));
    }

    #[test]
    fn test_manifest_rejects_empty_file_field() {
        let result = SoundManifest::from_json(
            r#"{ "sounds": [ { "name": "menu_select", "file": "" } ] }"#,
        );
        assert!(matches!(result, Err(ManifestError::Invalid(_))));
    }

    #[test]
    fn test_manifest_load_missing_path() {
        let result = SoundManifest::load(Path::new("/no/such/manifest.json"));
        assert!(matches!(result, Err(ManifestError::ReadFailed { .. })));
    }

    #[test]
    fn test_manifest_iter_yields_positional_ids() {
        let manifest = SoundManifest::new(vec![
            SoundDef::new("opening", "opening.wav"),
            SoundDef::new("countdown", "countdown.wav"),
        ]);

        let ids: Vec<usize> = manifest.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
