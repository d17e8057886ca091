//! Menu sound effects
//!
//! The skin only decides *when* a sound plays; a [`SoundPlayer`] decides how.
//! Any `FnMut(Sound)` closure works as a player, and [`RodioSoundPlayer`]
//! synthesizes short procedural blips so the demo needs no audio assets.

use rodio::{OutputStream, Sink, Source};
use std::time::Duration;

/// Interaction events the skin can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    CheckboxTicked,
    SliderChanged,
    ComboboxSelected,
    ButtonClicked,
    /// Mouse moved onto a button
    ItemEntered,
}

/// Receives sound events from the skin
pub trait SoundPlayer {
    fn play(&mut self, sound: Sound);
}

impl<F: FnMut(Sound)> SoundPlayer for F {
    fn play(&mut self, sound: Sound) {
        self(sound)
    }
}

/// Pitch, length and loudness of the blip for each sound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub frequency: f32,
    pub duration_ms: u64,
    pub volume: f32,
}

impl Sound {
    pub fn tone(self) -> ToneSpec {
        match self {
            Sound::CheckboxTicked => ToneSpec { frequency: 880.0, duration_ms: 60, volume: 0.5 },
            Sound::SliderChanged => ToneSpec { frequency: 660.0, duration_ms: 25, volume: 0.3 },
            Sound::ComboboxSelected => ToneSpec { frequency: 740.0, duration_ms: 80, volume: 0.5 },
            Sound::ButtonClicked => ToneSpec { frequency: 523.0, duration_ms: 90, volume: 0.6 },
            Sound::ItemEntered => ToneSpec { frequency: 1046.0, duration_ms: 30, volume: 0.25 },
        }
    }
}

/// Sine blip with a linear attack and exponential decay
pub struct ToneGenerator {
    sample_rate: u32,
    frequency: f32,
    volume: f32,
    index: u32,
    total: u32,
}

impl ToneGenerator {
    pub fn new(tone: ToneSpec) -> Self {
        let sample_rate = 44100;
        ToneGenerator {
            sample_rate,
            frequency: tone.frequency,
            volume: tone.volume,
            index: 0,
            total: (sample_rate as u64 * tone.duration_ms / 1000) as u32,
        }
    }

    fn envelope(&self) -> f32 {
        let attack = (self.sample_rate / 500).max(1); // 2ms
        if self.index < attack {
            self.index as f32 / attack as f32
        } else {
            let t = (self.index - attack) as f32 / self.total.max(1) as f32;
            (-5.0 * t).exp()
        }
    }
}

impl Iterator for ToneGenerator {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total {
            return None;
        }
        let phase = self.index as f32 * self.frequency / self.sample_rate as f32;
        let sample = (phase * std::f32::consts::TAU).sin() * self.volume * self.envelope();
        self.index += 1;
        Some(sample)
    }
}

impl Source for ToneGenerator {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.total - self.index) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(self.total as f32 / self.sample_rate as f32))
    }
}

/// Plays menu sounds on the default audio device
pub struct RodioSoundPlayer {
    _stream: OutputStream,
    sink: Sink,
    enabled: bool,
}

impl RodioSoundPlayer {
    /// Opens the default output device, `None` if there is no usable device
    pub fn new() -> Option<Self> {
        let (stream, handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(e) => {
                log::warn!("No audio output device, menu sounds disabled: {}", e);
                return None;
            }
        };
        match Sink::try_new(&handle) {
            Ok(sink) => {
                sink.set_volume(0.5);
                log::info!("Menu sounds enabled");
                Some(RodioSoundPlayer {
                    _stream: stream,
                    sink,
                    enabled: true,
                })
            }
            Err(e) => {
                log::warn!("Could not create audio sink: {}", e);
                None
            }
        }
    }

    pub fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.sink.stop();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&mut self, sound: Sound) {
        if !self.enabled {
            return;
        }
        log::trace!("Playing {:?}", sound);
        self.sink.append(ToneGenerator::new(sound.tone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_player() {
        let mut played = Vec::new();
        {
            let mut player = |s: Sound| played.push(s);
            player.play(Sound::ButtonClicked);
            player.play(Sound::ItemEntered);
        }
        assert_eq!(played, vec![Sound::ButtonClicked, Sound::ItemEntered]);
    }

    #[test]
    fn test_tone_length_matches_duration() {
        let tone = Sound::ButtonClicked.tone();
        let generator = ToneGenerator::new(tone);
        let expected = (44100 * tone.duration_ms / 1000) as usize;
        assert_eq!(generator.count(), expected);
    }

    #[test]
    fn test_tone_stays_within_volume() {
        let tone = Sound::CheckboxTicked.tone();
        assert!(ToneGenerator::new(tone).all(|s| s.abs() <= tone.volume + f32::EPSILON));
    }

    #[test]
    fn test_tone_fades_out() {
        let samples: Vec<f32> = ToneGenerator::new(Sound::ComboboxSelected.tone()).collect();
        let peak = |chunk: &[f32]| chunk.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        let head = peak(&samples[..500]);
        let tail = peak(&samples[samples.len() - 500..]);
        assert!(tail < head);
    }
}
