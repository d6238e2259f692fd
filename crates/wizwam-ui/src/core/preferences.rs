//! User defaults for the download form.
//!
//! # Design
//! - The settings page writes plain strings under fixed keys; this module only
//!   reads them.
//! - Storage is behind [`PreferenceStore`] so defaults resolve in host tests.

/// Storage key for the preferred quality preset.
pub const QUALITY_KEY: &str = "default_quality";
/// Storage key for the preferred video codec.
pub const VIDEO_CODEC_KEY: &str = "default_video_codec";
/// Storage key for the preferred audio codec.
pub const AUDIO_CODEC_KEY: &str = "default_audio_codec";

/// Read-only key/value preference source.
pub trait PreferenceStore {
    /// Raw value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;
}

/// Saved form defaults. `None` means the user never chose one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormDefaults {
    /// Preferred quality preset.
    pub quality: Option<String>,
    /// Preferred video codec.
    pub video_codec: Option<String>,
    /// Preferred audio codec.
    pub audio_codec: Option<String>,
}

impl FormDefaults {
    /// Load saved defaults, ignoring blank values.
    #[must_use]
    pub fn load(store: &impl PreferenceStore) -> Self {
        let read = |key: &str| store.read(key).filter(|value| !value.trim().is_empty());
        Self {
            quality: read(QUALITY_KEY),
            video_codec: read(VIDEO_CODEC_KEY),
            audio_codec: read(AUDIO_CODEC_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapStore(HashMap<&'static str, &'static str>);

    impl PreferenceStore for MapStore {
        fn read(&self, key: &str) -> Option<String> {
            self.0.get(key).map(ToString::to_string)
        }
    }

    #[test]
    fn load_reads_known_keys() {
        let store = MapStore(HashMap::from([
            (QUALITY_KEY, "1080p"),
            (AUDIO_CODEC_KEY, "opus"),
            ("unrelated", "x"),
        ]));
        let defaults = FormDefaults::load(&store);
        assert_eq!(defaults.quality.as_deref(), Some("1080p"));
        assert_eq!(defaults.video_codec, None);
        assert_eq!(defaults.audio_codec.as_deref(), Some("opus"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let store = MapStore(HashMap::from([(VIDEO_CODEC_KEY, "  ")]));
        assert_eq!(FormDefaults::load(&store), FormDefaults::default());
    }
}
