//! Audio dispatch for simulation cues
//!
//! The simulation only names cues. A sink decides what to do with them: the
//! silent sink drops everything, `AudioManager` resolves cues against the
//! asset catalog and reports playback through the log.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::settings::Settings;
use crate::sim::SoundCue;

/// Music track file name inside the assets directory
pub const MUSIC_FILE: &str = "music.ogg";

/// Anything that can play named cues
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
    /// Flip the music loop; returns whether music is now playing
    fn toggle_music(&mut self) -> bool;
}

/// Sink that ignores everything (tests, muted headless runs)
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: SoundCue) {}

    fn toggle_music(&mut self) -> bool {
        false
    }
}

/// Sound files found in the assets directory
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    sounds: HashMap<SoundCue, PathBuf>,
    music: Option<PathBuf>,
}

impl AssetCatalog {
    /// Look for `<cue>.wav` per cue and `music.ogg`. Missing files are logged
    /// and simply absent from the catalog.
    pub fn scan(dir: &Path) -> Self {
        let mut catalog = Self::default();
        if !dir.is_dir() {
            log::warn!("Assets directory {} not found, audio disabled", dir.display());
            return catalog;
        }
        for cue in SoundCue::ALL {
            let path = dir.join(format!("{}.wav", cue.as_str()));
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {
                    catalog.sounds.insert(cue, path);
                }
                _ => log::warn!("Missing sound asset {}", path.display()),
            }
        }
        let music = dir.join(MUSIC_FILE);
        if music.is_file() {
            catalog.music = Some(music);
        } else {
            log::warn!("Missing music asset {}", music.display());
        }
        log::info!(
            "Audio assets: {}/{} sounds, music {}",
            catalog.sounds.len(),
            SoundCue::ALL.len(),
            if catalog.music.is_some() { "found" } else { "missing" }
        );
        catalog
    }

    pub fn sound(&self, cue: SoundCue) -> Option<&Path> {
        self.sounds.get(&cue).map(PathBuf::as_path)
    }

    pub fn music(&self) -> Option<&Path> {
        self.music.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty() && self.music.is_none()
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    catalog: AssetCatalog,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
    /// Cues actually dispatched, per kind
    played: HashMap<SoundCue, u32>,
}

impl AudioManager {
    pub fn new(catalog: AssetCatalog) -> Self {
        Self {
            catalog,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
            played: HashMap::new(),
        }
    }

    /// Build from settings; music starts if enabled and the track exists
    pub fn from_settings(catalog: AssetCatalog, settings: &Settings) -> Self {
        let mut audio = Self::new(catalog);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        if settings.music_enabled {
            audio.toggle_music();
        }
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Music loop volume after master scaling
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn play_count(&self, cue: SoundCue) -> u32 {
        self.played.get(&cue).copied().unwrap_or(0)
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(path) = self.catalog.sound(cue) else {
            return;
        };
        log::debug!("play {} ({}) at {:.2}", cue.as_str(), path.display(), vol);
        *self.played.entry(cue).or_default() += 1;
    }

    fn toggle_music(&mut self) -> bool {
        if self.music_playing {
            self.music_playing = false;
            log::info!("Music stopped");
        } else if let Some(track) = self.catalog.music() {
            self.music_playing = true;
            log::info!(
                "Music looping: {} at {:.2}",
                track.display(),
                self.effective_music_volume()
            );
        }
        self.music_playing
    }
}
