//! Audio output
//!
//! Push-model audio: the application submits interleaved f32 sample
//! frames from its callbacks, a lock-free SPSC ring carries them across
//! the real-time boundary, and the platform-managed output stream drains
//! the ring from its own callback thread. The ring is the only point of
//! contact between the two threads.

pub mod ring;
pub mod output;

pub use ring::{sample_ring, AudioSubmitter, RingConsumer};
pub use output::AudioOutput;
