use super::wav::PcmAudio;
use crate::{MouthpieceError, Result};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use tracing::debug;

const CHUNK_FRAMES: usize = 1024;

/// Mono sinc resampler between two fixed rates
pub struct MonoResampler {
    inner: SincFixedIn<f32>,
    input_rate: u32,
    output_rate: u32,
}

impl MonoResampler {
    pub fn new(input_rate: u32, output_rate: u32) -> Result<Self> {
        if input_rate == 0 || output_rate == 0 {
            return Err(MouthpieceError::ConfigError(
                "Sample rates must be greater than 0".into(),
            ));
        }

        let params = SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };

        let inner = SincFixedIn::<f32>::new(
            output_rate as f64 / input_rate as f64,
            2.0,
            params,
            CHUNK_FRAMES,
            1,
        )
        .map_err(|e| MouthpieceError::AudioProcessingError(format!("Failed to create resampler: {}", e)))?;

        Ok(Self {
            inner,
            input_rate,
            output_rate,
        })
    }

    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }

    /// Resample a whole clip. The final chunk is zero padded and trimmed back
    /// to the length the input implies.
    pub fn process(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let ratio = self.output_rate as f64 / self.input_rate as f64;
        let expected = (input.len() as f64 * ratio).ceil() as usize;
        let mut output = Vec::with_capacity(expected + CHUNK_FRAMES);

        for chunk in input.chunks(CHUNK_FRAMES) {
            let mut frame = vec![0.0f32; CHUNK_FRAMES];
            frame[..chunk.len()].copy_from_slice(chunk);

            let processed = self
                .inner
                .process(&[frame], None)
                .map_err(|e| MouthpieceError::AudioProcessingError(format!("Resampling failed: {}", e)))?;

            if let Some(channel) = processed.into_iter().next() {
                output.extend(channel);
            }
        }

        output.truncate(expected);
        debug!("Resampled {} -> {} samples", input.len(), output.len());
        Ok(output)
    }
}

/// Convert a clip to `target_rate`, passing it through when already there
pub fn resample_to(pcm: &PcmAudio, target_rate: u32) -> Result<PcmAudio> {
    if pcm.sample_rate == target_rate {
        return Ok(pcm.clone());
    }
    let mut resampler = MonoResampler::new(pcm.sample_rate, target_rate)?;
    Ok(PcmAudio::new(resampler.process(&pcm.samples)?, target_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rates() {
        assert!(MonoResampler::new(0, 48000).is_err());
        assert!(MonoResampler::new(16000, 0).is_err());
    }

    #[test]
    fn test_upsample_length() {
        let pcm = PcmAudio::new((0..1600).map(|i| (i as f32 * 0.01).sin()).collect(), 16000);
        let out = resample_to(&pcm, 48000).unwrap();
        assert_eq!(out.sample_rate, 48000);
        assert!(out.samples.len() <= 4800);
        assert!(out.samples.len() > 3000);
    }

    #[test]
    fn test_same_rate_passthrough() {
        let pcm = PcmAudio::new(vec![0.1, 0.2, 0.3], 22050);
        assert_eq!(resample_to(&pcm, 22050).unwrap(), pcm);
    }

    #[test]
    fn test_empty_input() {
        let mut resampler = MonoResampler::new(22050, 48000).unwrap();
        assert!(resampler.process(&[]).unwrap().is_empty());
    }
}
