//! Lock-free sample ring between the application and the audio thread
//!
//! A single-producer single-consumer ring of interleaved f32 samples.
//! The producer half lives in the shell context and is fed from
//! application callbacks; the consumer half is moved into the output
//! stream's callback and drained on the audio thread. Neither side
//! blocks or allocates.

use rtrb::{Consumer, Producer, RingBuffer};

/// Consumer half of the sample ring, owned by the audio callback.
pub type RingConsumer = Consumer<f32>;

/// Producer half of the sample ring.
///
/// This is the submit-samples operation the application sees: push
/// interleaved samples, get back how many were accepted.
pub struct AudioSubmitter {
    producer: Producer<f32>,
}

impl AudioSubmitter {
    /// Submit interleaved samples to the output stream.
    ///
    /// Accepts up to the ring's free space and returns the number of
    /// samples taken; the caller may retry the remainder on a later
    /// frame. One frame is `channels` consecutive samples.
    pub fn push_interleaved(&mut self, samples: &[f32]) -> usize {
        let mut written = 0;
        for &sample in samples {
            if self.producer.push(sample).is_err() {
                break;
            }
            written += 1;
        }
        written
    }

    /// Number of samples the ring can currently accept.
    pub fn free_samples(&self) -> usize {
        self.producer.slots()
    }
}

/// Create a sample ring holding up to `capacity_samples` samples.
pub fn sample_ring(capacity_samples: usize) -> (AudioSubmitter, RingConsumer) {
    let (producer, consumer) = RingBuffer::new(capacity_samples);
    (AudioSubmitter { producer }, consumer)
}

/// Drain the ring into an output buffer, zero-filling on underrun.
///
/// Runs on the audio thread. Returns the number of samples that came
/// from the ring; the rest of `out` is silence.
pub fn drain_interleaved(consumer: &mut RingConsumer, out: &mut [f32]) -> usize {
    let mut filled = 0;
    while filled < out.len() {
        match consumer.pop() {
            Ok(sample) => {
                out[filled] = sample;
                filled += 1;
            }
            Err(_) => break,
        }
    }

    // Underrun: the device keeps running, it just hears silence
    for sample in &mut out[filled..] {
        *sample = 0.0;
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_then_drain_preserves_order() {
        let (mut submitter, mut consumer) = sample_ring(16);

        let input = [0.1f32, 0.2, 0.3, 0.4];
        assert_eq!(submitter.push_interleaved(&input), 4);

        let mut out = [0.0f32; 4];
        assert_eq!(drain_interleaved(&mut consumer, &mut out), 4);
        assert_eq!(out, input);
    }

    #[test]
    fn test_submit_clamps_to_capacity() {
        let (mut submitter, _consumer) = sample_ring(4);

        let input = [1.0f32; 8];
        assert_eq!(submitter.push_interleaved(&input), 4);
        assert_eq!(submitter.free_samples(), 0);
        assert_eq!(submitter.push_interleaved(&input), 0);
    }

    #[test]
    fn test_drain_fills_silence_on_underrun() {
        let (mut submitter, mut consumer) = sample_ring(16);

        submitter.push_interleaved(&[0.5f32, 0.5]);

        let mut out = [9.0f32; 6];
        assert_eq!(drain_interleaved(&mut consumer, &mut out), 2);
        assert_eq!(out, [0.5, 0.5, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_capacity_freed_after_drain() {
        let (mut submitter, mut consumer) = sample_ring(4);

        assert_eq!(submitter.push_interleaved(&[1.0; 4]), 4);
        let mut out = [0.0f32; 4];
        drain_interleaved(&mut consumer, &mut out);

        assert_eq!(submitter.push_interleaved(&[2.0; 4]), 4);
    }
}
