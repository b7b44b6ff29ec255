use crate::{MouthpieceError, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, info};

/// Decoded mono PCM
#[derive(Debug, Clone, PartialEq)]
pub struct PcmAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl PcmAudio {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Index of the sample playing at `t` seconds
    pub fn index_at(&self, t: f64) -> usize {
        (t.max(0.0) * self.sample_rate as f64) as usize
    }
}

fn spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Write mono samples to a 16-bit WAV file
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let mut writer = WavWriter::create(path.as_ref(), spec(sample_rate))
        .map_err(|e| MouthpieceError::IOError(format!("Failed to create WAV writer: {}", e)))?;

    for &sample in samples {
        writer
            .write_sample(to_i16(sample))
            .map_err(|e| MouthpieceError::IOError(format!("Failed to write sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| MouthpieceError::IOError(format!("Failed to finalize WAV file: {}", e)))?;

    info!("Wrote {} samples to WAV file: {:?}", samples.len(), path.as_ref());
    Ok(())
}

/// Encode mono samples as an in-memory 16-bit WAV
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, spec(sample_rate))
            .map_err(|e| MouthpieceError::AudioProcessingError(format!("Failed to start WAV: {}", e)))?;
        for &sample in samples {
            writer
                .write_sample(to_i16(sample))
                .map_err(|e| MouthpieceError::AudioProcessingError(format!("Failed to write sample: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| MouthpieceError::AudioProcessingError(format!("Failed to finalize WAV: {}", e)))?;
    }
    Ok(cursor.into_inner())
}

/// Read a WAV file, downmixing to mono
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<PcmAudio> {
    let reader = WavReader::open(path.as_ref())
        .map_err(|e| MouthpieceError::IOError(format!("Failed to open WAV file: {}", e)))?;
    read_samples(reader)
}

/// Decode in-memory WAV bytes, downmixing to mono
pub fn decode_wav(bytes: &[u8]) -> Result<PcmAudio> {
    let reader = WavReader::new(Cursor::new(bytes))
        .map_err(|e| MouthpieceError::AudioProcessingError(format!("Invalid WAV data: {}", e)))?;
    read_samples(reader)
}

fn read_samples<R: Read>(mut reader: WavReader<R>) -> Result<PcmAudio> {
    let spec = reader.spec();

    debug!(
        "Reading WAV: {} Hz, {} channels, {} bits",
        spec.sample_rate, spec.channels, spec.bits_per_sample
    );

    let read_err = |e: hound::Error| MouthpieceError::AudioProcessingError(format!("Failed to read sample: {}", e));

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, _) => reader.samples::<f32>().map(|s| s.map_err(read_err)).collect::<Result<_>>()?,
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|v| v as f32 / i8::MAX as f32).map_err(read_err))
            .collect::<Result<_>>()?,
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / i16::MAX as f32).map_err(read_err))
            .collect::<Result<_>>()?,
        (SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 8388608.0).map_err(read_err))
            .collect::<Result<_>>()?,
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / i32::MAX as f32).map_err(read_err))
            .collect::<Result<_>>()?,
        (_, bits) => {
            return Err(MouthpieceError::AudioProcessingError(format!(
                "Unsupported bit depth: {}",
                bits
            )))
        }
    };

    let samples = downmix(&samples, spec.channels);
    debug!("Decoded {} mono samples", samples.len());

    Ok(PcmAudio::new(samples, spec.sample_rate))
}

/// Average interleaved channels into one
pub fn downmix(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels as usize)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(sample_rate: u32, secs: f32) -> Vec<f32> {
        (0..(sample_rate as f32 * secs) as usize)
            .map(|i| (2.0 * PI * 440.0 * i as f32 / sample_rate as f32).sin() * 0.5)
            .collect()
    }

    #[test]
    fn test_write_read_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let samples = sine(16000, 1.0);

        write_wav(&path, &samples, 16000).unwrap();
        let pcm = read_wav(&path).unwrap();

        assert_eq!(pcm.sample_rate, 16000);
        assert_eq!(pcm.samples.len(), samples.len());
        for (original, read) in samples.iter().zip(pcm.samples.iter()) {
            assert!((original - read).abs() < 0.001);
        }
    }

    #[test]
    fn test_decode_in_memory() {
        let bytes = encode_wav(&sine(8000, 0.25), 8000).unwrap();
        let pcm = decode_wav(&bytes).unwrap();
        assert_eq!(pcm.samples.len(), 2000);
        assert!((pcm.duration_secs() - 0.25).abs() < 1e-9);
        assert_eq!(pcm.index_at(0.125), 1000);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_wav(b"definitely not a wav").is_err());
    }

    #[test]
    fn test_downmix_stereo() {
        let mono = downmix(&[0.5, 0.3, 0.7, 0.1], 2);
        assert_eq!(mono.len(), 2);
        assert!((mono[0] - 0.4).abs() < 0.001);
        assert!((mono[1] - 0.4).abs() < 0.001);
    }
}
