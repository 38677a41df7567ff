//! Audio decoder using symphonia.
//!
//! Decodes a whole file into interleaved `f32` samples. Ambient loops are
//! short enough to keep fully in memory, and voices need random access to
//! wrap around at the loop point.

use ambience_core::{AmbienceError, Result};
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

/// Immutable decoded audio, shared by every voice that plays it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBuffer {
    /// Interleaved samples in `[-1, 1]`.
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl DecodedBuffer {
    /// Wrap interleaved samples.
    ///
    /// The sample count must be a non-zero multiple of `channels`.
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Result<Self> {
        if channels == 0 {
            return Err(AmbienceError::InvalidParameter("channel count is zero".into()));
        }
        if sample_rate == 0 {
            return Err(AmbienceError::InvalidParameter("sample rate is zero".into()));
        }
        if samples.is_empty() {
            return Err(AmbienceError::Decode("audio contains no samples".into()));
        }
        if samples.len() % channels as usize != 0 {
            return Err(AmbienceError::InvalidParameter(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels
            )));
        }
        Ok(Self {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Interleaved sample data.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Source sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Sample at `frame` on `channel`. Both must be in range.
    #[inline]
    pub fn sample(&self, frame: usize, channel: usize) -> f32 {
        self.samples[frame * self.channels as usize + channel]
    }
}

/// Decode an audio file from disk.
pub fn decode_file(path: &Path) -> Result<DecodedBuffer> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AmbienceError::NotFound(path.display().to_string()),
        _ => AmbienceError::Io(e),
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    debug!(path = %path.display(), "Decoding audio file");
    decode_stream(mss, hint)
}

/// Decode audio already held in memory. `extension` is a format hint such as `"wav"`.
pub fn decode_bytes(bytes: Vec<u8>, extension: Option<&str>) -> Result<DecodedBuffer> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    decode_stream(mss, hint)
}

fn decode_stream(mss: MediaSourceStream, hint: Hint) -> Result<DecodedBuffer> {
    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| AmbienceError::UnsupportedFormat(e.to_string()))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AmbienceError::Decode("no audio track found".into()))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| AmbienceError::UnsupportedFormat(e.to_string()))?;

    let mut first_spec: Option<(u32, u16)> = None;
    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(AmbienceError::Decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                check_spec(&mut first_spec, spec.rate, spec.channels.count() as u16)?;

                let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                sample_buf.copy_interleaved_ref(decoded);
                samples.extend_from_slice(sample_buf.samples());
            }
            Err(SymphoniaError::DecodeError(e)) => {
                warn!("Skipping undecodable packet: {}", e);
                continue;
            }
            Err(e) => return Err(AmbienceError::Decode(e.to_string())),
        }
    }

    let (sample_rate, channels) = first_spec.unwrap_or_else(|| {
        (
            codec_params.sample_rate.unwrap_or(0),
            codec_params.channels.map(|c| c.count() as u16).unwrap_or(0),
        )
    });
    DecodedBuffer::new(samples, sample_rate, channels)
}

/// Record the first decoded packet's format and reject any later change.
///
/// The samples are concatenated into one interleaved buffer, so a stream
/// that switches rate or channel count mid-way cannot be represented.
fn check_spec(first: &mut Option<(u32, u16)>, sample_rate: u32, channels: u16) -> Result<()> {
    match *first {
        None => {
            *first = Some((sample_rate, channels));
            Ok(())
        }
        Some(spec) if spec == (sample_rate, channels) => Ok(()),
        Some((rate, ch)) => Err(AmbienceError::Decode(format!(
            "stream changed format from {} Hz/{} ch to {} Hz/{} ch",
            rate, ch, sample_rate, channels
        ))),
    }
}
