use data::{HapticSink, HapticsCfg, Intensity};

use rodio::buffer::SamplesBuffer;
use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Source};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const CLICK_BASE_HZ: f32 = 140.0;
const CLICK_SPAN_HZ: f32 = 460.0;
const CLICK_LENGTH: Duration = Duration::from_millis(18);

const OVERLAP_THRESHOLD: Duration = Duration::from_millis(10);

#[derive(Debug, thiserror::Error)]
pub enum HapticsError {
    #[error("Failed to open audio output: {0}")]
    OpenOutput(#[from] rodio::StreamError),
    #[error("Failed to read click sound {path}: {source}")]
    ReadSound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode click sound: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("Failed to create audio sink: {0}")]
    CreateSink(#[from] rodio::PlayError),
}

impl HapticsError {
    /// True when the audio output device is missing/unavailable/lost
    pub fn is_no_device(&self) -> bool {
        matches!(
            self,
            HapticsError::OpenOutput(rodio::StreamError::NoDevice)
                | HapticsError::CreateSink(rodio::PlayError::NoDevice)
        )
    }
}

/// Feedback pulse rendered as a short click on the default audio output.
pub struct SoundPulse {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    volume: Option<f32>,
    sample: Option<SamplesBuffer<i16>>,
    last_played: (Option<Instant>, usize),
    reported: bool,
}

impl SoundPulse {
    pub fn new(cfg: &HapticsCfg) -> Result<Self, HapticsError> {
        let (stream, stream_handle) = OutputStream::try_default()?;

        let sample = cfg.sound.as_deref().map(load_sample).transpose()?;

        Ok(SoundPulse {
            _stream: stream,
            stream_handle,
            volume: cfg.volume.map(|v| v.clamp(0.0, 100.0)),
            sample,
            last_played: (None, 0),
            reported: false,
        })
    }

    fn play(&mut self, intensity: Intensity) -> Result<(), HapticsError> {
        let Some(base_volume) = self.volume else {
            return Ok(());
        };

        let now = Instant::now();
        let (last_time, count) = &mut self.last_played;

        let overlap_count = match last_time {
            Some(last) if now.duration_since(*last) < OVERLAP_THRESHOLD => {
                *count += 1;
                *count
            }
            _ => {
                *count = 1;
                1
            }
        };
        *last_time = Some(now);

        let adjusted_volume = base_volume * intensity.level() / (overlap_count as f32);

        let sink = rodio::Sink::try_new(&self.stream_handle)?;
        sink.set_volume(adjusted_volume / 100.0);
        match &self.sample {
            Some(buffer) => sink.append(buffer.clone()),
            None => sink.append(click(intensity)),
        }
        sink.detach();

        Ok(())
    }
}

impl HapticSink for SoundPulse {
    fn pulse(&mut self, intensity: Intensity) {
        if let Err(err) = self.play(intensity)
            && !self.reported
        {
            log::warn!("Haptic pulse failed: {err}");
            self.reported = true;
        }
    }
}

/// Opens the pulse output if haptics are enabled. A missing device disables
/// pulses for the session instead of failing.
pub fn init(cfg: &HapticsCfg) -> Option<SoundPulse> {
    if !cfg.enabled {
        log::info!("Haptic pulses disabled by config");
        return None;
    }

    match SoundPulse::new(cfg) {
        Ok(pulse) => Some(pulse),
        Err(err) if err.is_no_device() => {
            log::warn!("No audio output device, haptic pulses are off: {err}");
            None
        }
        Err(err) => {
            log::error!("Haptics initialization error: {err}");
            None
        }
    }
}

fn click(intensity: Intensity) -> impl Source<Item = f32> + Send + 'static {
    SineWave::new(click_frequency(intensity))
        .take_duration(CLICK_LENGTH)
        .amplify(0.5 + intensity.level() * 0.5)
}

fn click_frequency(intensity: Intensity) -> f32 {
    CLICK_BASE_HZ + CLICK_SPAN_HZ * intensity.sharpness()
}

fn load_sample(path: &Path) -> Result<SamplesBuffer<i16>, HapticsError> {
    let data = std::fs::read(path).map_err(|source| HapticsError::ReadSound {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(std::io::Cursor::new(data))?;

    Ok(SamplesBuffer::new(
        decoder.channels(),
        decoder.sample_rate(),
        decoder.collect::<Vec<i16>>(),
    ))
}
