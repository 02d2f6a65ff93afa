//! Audio system
//!
//! Procedurally generated sound cues and music loop - no external files needed!
//! Playback goes through `rodio` with the `audio` feature; without it the
//! cues ring the terminal bell and the music is silent.

use std::collections::HashMap;

use anyhow::Result;

use crate::settings::Settings;
use crate::sim::{GameEvent, SoundCue};

pub const SAMPLE_RATE: u32 = 44_100;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Waveform {
    Sine,
    Square,
    Triangle,
}

impl Waveform {
    /// Sample at `phase` in cycles (fractional part used)
    fn sample(self, phase: f32) -> f32 {
        let p = phase.fract();
        match self {
            Waveform::Sine => (p * std::f32::consts::TAU).sin(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 4.0 * (p - 0.5).abs() - 1.0,
        }
    }
}

/// One note: exponential pitch ramp under an exponential decay
#[derive(Debug, Clone, Copy)]
struct Tone {
    wave: Waveform,
    start_freq: f32,
    end_freq: f32,
    duration: f32,
    gain: f32,
}

impl Tone {
    const fn new(wave: Waveform, start_freq: f32, end_freq: f32, duration: f32, gain: f32) -> Self {
        Self {
            wave,
            start_freq,
            end_freq,
            duration,
            gain,
        }
    }

    fn render_into(&self, out: &mut Vec<f32>, sample_rate: u32) {
        let count = (self.duration * sample_rate as f32).round() as usize;
        let mut phase = 0.0f32;
        for i in 0..count {
            let t = i as f32 / count as f32;
            let freq = self.start_freq * (self.end_freq / self.start_freq).powf(t);
            // Decay to 1% by the end of the note
            let envelope = 0.01f32.powf(t);
            out.push(self.wave.sample(phase) * self.gain * envelope);
            phase = (phase + freq / sample_rate as f32).fract();
        }
    }
}

fn render(tones: &[Tone], sample_rate: u32) -> Vec<f32> {
    let mut out = Vec::new();
    for tone in tones {
        tone.render_into(&mut out, sample_rate);
    }
    out
}

/// Render a sound cue as mono samples in [-1, 1]
pub fn synthesize(cue: SoundCue, sample_rate: u32) -> Vec<f32> {
    use Waveform::*;
    match cue {
        // Bright two-note chime
        SoundCue::Catch => render(
            &[
                Tone::new(Sine, 660.0, 660.0, 0.08, 0.5),
                Tone::new(Sine, 880.0, 990.0, 0.14, 0.5),
            ],
            sample_rate,
        ),
        // Low buzzing drop
        SoundCue::Miss => render(&[Tone::new(Square, 220.0, 90.0, 0.3, 0.25)], sample_rate),
        // Sad descending arpeggio
        SoundCue::GameOver => render(
            &[
                Tone::new(Triangle, 440.0, 440.0, 0.25, 0.6),
                Tone::new(Triangle, 370.0, 370.0, 0.25, 0.6),
                Tone::new(Triangle, 311.0, 311.0, 0.25, 0.6),
                Tone::new(Triangle, 220.0, 180.0, 0.6, 0.6),
            ],
            sample_rate,
        ),
    }
}

/// Render one pass of the background loop
pub fn synthesize_music(sample_rate: u32) -> Vec<f32> {
    const MELODY: [f32; 8] = [392.0, 523.3, 659.3, 523.3, 440.0, 587.3, 523.3, 392.0];
    let tones: Vec<Tone> = MELODY
        .iter()
        .map(|&f| Tone::new(Waveform::Triangle, f, f, 0.25, 0.35))
        .collect();
    render(&tones, sample_rate)
}

#[cfg(feature = "audio")]
mod backend {
    use anyhow::{Context, Result};
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

    use super::SAMPLE_RATE;

    /// Default output device
    pub struct Backend {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Option<Sink>,
    }

    impl Backend {
        pub fn open() -> Result<Self> {
            let (stream, handle) = OutputStream::try_default().context("opening audio output")?;
            Ok(Self {
                _stream: stream,
                handle,
                music: None,
            })
        }

        pub fn play_once(&self, samples: &[f32], gain: f32) {
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.set_volume(gain);
                    sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.to_vec()));
                    sink.detach();
                }
                Err(e) => log::warn!("Audio sink unavailable: {e}"),
            }
        }

        pub fn play_loop(&mut self, samples: &[f32], gain: f32) {
            self.stop_loop();
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.set_volume(gain);
                    sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.to_vec()).repeat_infinite());
                    self.music = Some(sink);
                }
                Err(e) => log::warn!("Audio sink unavailable: {e}"),
            }
        }

        pub fn stop_loop(&mut self) {
            if let Some(sink) = self.music.take() {
                sink.stop();
            }
        }
    }
}

#[cfg(not(feature = "audio"))]
mod backend {
    use std::io::Write;

    use anyhow::Result;

    /// Terminal bell; music is not supported
    pub struct Backend;

    impl Backend {
        pub fn open() -> Result<Self> {
            Ok(Self)
        }

        pub fn play_once(&self, _samples: &[f32], _gain: f32) {
            let mut out = std::io::stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }

        pub fn play_loop(&mut self, _samples: &[f32], _gain: f32) {
            log::debug!("Music loop requested (no audio backend)");
        }

        pub fn stop_loop(&mut self) {}
    }
}

use backend::Backend;

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Backend>,
    sfx_gain: f32,
    music_gain: f32,
    cues: HashMap<SoundCue, Vec<f32>>,
    music: Vec<f32>,
    music_playing: bool,
}

impl AudioManager {
    /// Open the output and pre-render every cue
    ///
    /// A fully muted configuration never touches the device.
    pub fn new(settings: &Settings) -> Result<Self> {
        let sfx_gain = settings.sfx_gain();
        let music_gain = settings.music_gain();
        let backend = if sfx_gain > 0.0 || music_gain > 0.0 {
            Some(Backend::open()?)
        } else {
            log::info!("Audio muted");
            None
        };

        let cues = [SoundCue::Catch, SoundCue::Miss, SoundCue::GameOver]
            .into_iter()
            .map(|cue| (cue, synthesize(cue, SAMPLE_RATE)))
            .collect();

        Ok(Self {
            backend,
            sfx_gain,
            music_gain,
            cues,
            music: synthesize_music(SAMPLE_RATE),
            music_playing: false,
        })
    }

    /// Manager that tracks state but never makes a sound
    pub fn silent() -> Self {
        Self {
            backend: None,
            sfx_gain: 0.0,
            music_gain: 0.0,
            cues: HashMap::new(),
            music: Vec::new(),
            music_playing: false,
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Play a sound cue
    pub fn play(&self, cue: SoundCue) {
        log::debug!("cue {}", cue.as_str());
        if self.sfx_gain <= 0.0 {
            return;
        }
        let (Some(backend), Some(samples)) = (&self.backend, self.cues.get(&cue)) else {
            return;
        };
        backend.play_once(samples, self.sfx_gain);
    }

    /// Start the background loop from the top
    pub fn start_music(&mut self) {
        self.music_playing = true;
        if self.music_gain <= 0.0 {
            return;
        }
        if let Some(backend) = &mut self.backend {
            backend.play_loop(&self.music, self.music_gain);
        }
    }

    pub fn stop_music(&mut self) {
        self.music_playing = false;
        if let Some(backend) = &mut self.backend {
            backend.stop_loop();
        }
    }

    /// Perform the audio side of a tick event; other events are ignored
    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Sound(cue) => self.play(*cue),
            GameEvent::MusicStart => self.start_music(),
            GameEvent::MusicStop => self.stop_music(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_lengths() {
        let rate = 8_000;
        assert_eq!(synthesize(SoundCue::Catch, rate).len(), 640 + 1120);
        assert_eq!(synthesize(SoundCue::Miss, rate).len(), 2400);
        assert_eq!(synthesize(SoundCue::GameOver, rate).len(), 3 * 2000 + 4800);
        assert_eq!(synthesize_music(rate).len(), 8 * 2000);
    }

    #[test]
    fn test_samples_in_range() {
        for cue in [SoundCue::Catch, SoundCue::Miss, SoundCue::GameOver] {
            let samples = synthesize(cue, SAMPLE_RATE);
            assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
            assert!(samples.iter().any(|s| s.abs() > 0.1), "{cue:?} is silent");
        }
    }

    #[test]
    fn test_envelope_decays() {
        let samples = synthesize(SoundCue::Miss, SAMPLE_RATE);
        let head = samples[..500].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        let tail = samples[samples.len() - 500..]
            .iter()
            .fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(tail < head * 0.1);
    }

    #[test]
    fn test_waveforms() {
        assert!(Waveform::Sine.sample(0.0).abs() < 1e-6);
        assert!((Waveform::Sine.sample(0.25) - 1.0).abs() < 1e-6);
        assert_eq!(Waveform::Square.sample(0.1), 1.0);
        assert_eq!(Waveform::Square.sample(0.6), -1.0);
        assert_eq!(Waveform::Triangle.sample(0.0), 1.0);
        assert_eq!(Waveform::Triangle.sample(0.5), -1.0);
    }

    #[test]
    fn test_events_drive_music_state() {
        let mut audio = AudioManager::silent();
        assert!(!audio.music_playing());
        audio.handle(&GameEvent::MusicStart);
        assert!(audio.music_playing());
        audio.handle(&GameEvent::Sound(SoundCue::GameOver));
        audio.handle(&GameEvent::MusicStop);
        assert!(!audio.music_playing());
        audio.handle(&GameEvent::Quit);
    }

    #[test]
    fn test_muted_settings_skip_device() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let audio = AudioManager::new(&settings).unwrap();
        assert!(audio.backend.is_none());
        assert_eq!(audio.cues.len(), 3);
        audio.play(SoundCue::Catch);
    }
}
