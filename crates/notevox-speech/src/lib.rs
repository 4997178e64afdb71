//! Speech announcement abstraction for NoteVox.
//!
//! One outbound call, [`SpeechAnnouncer::say`]; no inbound data. The espeak
//! subprocess backend lives behind the `espeak` feature, and everything
//! degrades to [`NoopAnnouncer`] when speech is unsupported.

pub mod announcer;
#[cfg(feature = "espeak")]
pub mod espeak;
pub mod noop;
pub mod recording;

pub use announcer::SpeechAnnouncer;
#[cfg(feature = "espeak")]
pub use espeak::EspeakAnnouncer;
pub use noop::NoopAnnouncer;
pub use recording::RecordingAnnouncer;
