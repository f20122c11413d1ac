// Audio playback
//
// Game code talks to the `SoundPlayer` trait only. `RodioAudio` plays the
// sounds indexed by the asset registry; `SilentAudio` stands in when no
// output device can be opened.

use crate::engine::assets::{AssetHandle, AssetRegistry, SoundHandle};
use log::{debug, error, info, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::io::Cursor;

/// Identifies one started playback so it can be stopped later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackId(u64);

/// Playback capability used by characters and the session
pub trait SoundPlayer {
    /// Start the sound registered under `name`.
    ///
    /// Returns `None` when the sound does not exist or cannot be played; the
    /// caller carries on silently.
    fn play(&mut self, name: &str, looping: bool) -> Option<PlaybackId>;

    /// Stop a playback started by `play`. Unknown or finished ids are ignored.
    fn stop(&mut self, id: PlaybackId);
}

/// Audio backend errors
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("No audio output device: {0}")]
    Device(String),

    #[error("Failed to decode sound {name}: {reason}")]
    Decode { name: String, reason: String },

    #[error("Failed to create audio sink: {0}")]
    Sink(String),
}

/// rodio-backed sound player
pub struct RodioAudio {
    /// Must stay alive for the handle to produce sound
    _stream: OutputStream,
    handle: OutputStreamHandle,
    /// Encoded sound bytes by handle
    sounds: HashMap<SoundHandle, Vec<u8>>,
    /// Active sinks by playback id
    active: HashMap<PlaybackId, Sink>,
    next_id: u64,
}

impl std::fmt::Debug for RodioAudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioAudio")
            .field("sounds", &self.sounds.len())
            .field("active", &self.active.len())
            .finish_non_exhaustive()
    }
}

impl RodioAudio {
    /// Open the default output device and read every registered sound
    pub fn new(registry: &AssetRegistry) -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Device(e.to_string()))?;

        let mut sounds = HashMap::new();
        for name in registry.sound_names() {
            match registry.load_sound_bytes(name) {
                Ok(bytes) => {
                    sounds.insert(AssetHandle::from_name(name), bytes);
                }
                Err(e) => warn!("Skipping sound {}: {}", name, e),
            }
        }

        info!("Audio device initialized with {} sounds", sounds.len());

        Ok(Self {
            _stream: stream,
            handle,
            sounds,
            active: HashMap::new(),
            next_id: 1,
        })
    }

    fn start(&mut self, name: &str, looping: bool) -> Result<Option<PlaybackId>, AudioError> {
        let Some(bytes) = self.sounds.get(&AssetHandle::from_name(name)) else {
            return Ok(None);
        };

        let decoder = Decoder::new(Cursor::new(bytes.clone())).map_err(|e| AudioError::Decode {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Sink(e.to_string()))?;

        if looping {
            sink.append(decoder.repeat_infinite());
        } else {
            sink.append(decoder);
        }

        // Finished one-shots are dropped lazily here rather than polled every tick
        self.active.retain(|_, sink| !sink.empty());

        let id = PlaybackId(self.next_id);
        self.next_id += 1;
        self.active.insert(id, sink);
        Ok(Some(id))
    }
}

impl SoundPlayer for RodioAudio {
    fn play(&mut self, name: &str, looping: bool) -> Option<PlaybackId> {
        match self.start(name, looping) {
            Ok(Some(id)) => {
                debug!("Playing sound: {}", name);
                Some(id)
            }
            Ok(None) => {
                debug!("No sound found for: {}", name);
                None
            }
            Err(e) => {
                error!("{}", e);
                None
            }
        }
    }

    fn stop(&mut self, id: PlaybackId) {
        if let Some(sink) = self.active.remove(&id) {
            sink.stop();
        }
    }
}

/// Sound player that plays nothing
///
/// Used when the output device is unavailable or audio is muted from the
/// command line.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl SoundPlayer for SilentAudio {
    fn play(&mut self, name: &str, _looping: bool) -> Option<PlaybackId> {
        debug!("Audio disabled, not playing: {}", name);
        None
    }

    fn stop(&mut self, _id: PlaybackId) {}
}

/// Test double that records every call and hands out ids for known names
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingAudio {
    /// Names that `play` treats as existing
    pub available: std::collections::HashSet<String>,
    /// (name, looping) for every successful `play`
    pub played: Vec<(String, bool)>,
    /// Names that were requested but missing
    pub missing: Vec<String>,
    /// Ids passed to `stop`
    pub stopped: Vec<PlaybackId>,
    /// Ids currently playing
    pub playing: HashMap<PlaybackId, String>,
    next_id: u64,
}

#[cfg(test)]
impl RecordingAudio {
    pub fn with_sounds(names: &[&str]) -> Self {
        Self {
            available: names.iter().map(|name| name.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Name of every sound still playing
    pub fn playing_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.playing.values().map(String::as_str).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
impl SoundPlayer for RecordingAudio {
    fn play(&mut self, name: &str, looping: bool) -> Option<PlaybackId> {
        if !self.available.contains(name) {
            self.missing.push(name.to_string());
            return None;
        }
        self.next_id += 1;
        let id = PlaybackId(self.next_id);
        self.played.push((name.to_string(), looping));
        self.playing.insert(id, name.to_string());
        Some(id)
    }

    fn stop(&mut self, id: PlaybackId) {
        self.stopped.push(id);
        self.playing.remove(&id);
    }
}
