use parking_lot::Mutex;
use ringbuf::{traits::*, HeapRb};
use std::sync::Arc;

/// Shared tap of recently played samples.
///
/// The playback callback pushes what it sends to the device; the live
/// analyzer drains it once per frame. When full, the oldest samples are
/// overwritten so the analyzer always sees the most recent audio.
pub struct AudioRingBuffer {
    buffer: Arc<Mutex<HeapRb<f32>>>,
}

impl AudioRingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(HeapRb::new(capacity.max(1)))),
        }
    }

    /// Append samples, evicting the oldest ones on overflow
    pub fn push(&self, samples: &[f32]) {
        let mut buffer = self.buffer.lock();
        for &sample in samples {
            buffer.push_overwrite(sample);
        }
    }

    /// Take up to `count` of the oldest samples
    pub fn read(&self, count: usize) -> Vec<f32> {
        let mut buffer = self.buffer.lock();
        let mut samples = Vec::with_capacity(count.min(buffer.occupied_len()));
        while samples.len() < count {
            match buffer.try_pop() {
                Some(sample) => samples.push(sample),
                None => break,
            }
        }
        samples
    }

    /// Take everything currently buffered
    pub fn drain(&self) -> Vec<f32> {
        let mut buffer = self.buffer.lock();
        buffer.pop_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().occupied_len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    pub fn capacity(&self) -> usize {
        self.buffer.lock().capacity().get()
    }
}

impl Clone for AudioRingBuffer {
    fn clone(&self) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

impl std::fmt::Debug for AudioRingBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioRingBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_read_in_order() {
        let tap = AudioRingBuffer::new(1024);
        let data: Vec<f32> = (0..100).map(|i| i as f32).collect();
        tap.push(&data);
        assert_eq!(tap.read(40), data[..40].to_vec());
        assert_eq!(tap.len(), 60);
    }

    #[test]
    fn test_overflow_keeps_newest() {
        let tap = AudioRingBuffer::new(10);
        let data: Vec<f32> = (0..25).map(|i| i as f32).collect();
        tap.push(&data);
        assert_eq!(tap.drain(), data[15..].to_vec());
        assert!(tap.is_empty());
    }

    #[test]
    fn test_clones_share_storage() {
        let writer = AudioRingBuffer::new(16);
        let reader = writer.clone();
        writer.push(&[0.5; 4]);
        assert_eq!(reader.len(), 4);
        reader.clear();
        assert!(writer.is_empty());
    }
}
