use crate::announcer::SpeechAnnouncer;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Test announcer that records every utterance.
#[derive(Clone, Default)]
pub struct RecordingAnnouncer {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl RecordingAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }
}

#[async_trait]
impl SpeechAnnouncer for RecordingAnnouncer {
    async fn say(&self, text: &str) {
        self.spoken.lock().push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_in_order() {
        let announcer = RecordingAnnouncer::new();
        announcer.say("first").await;
        announcer.say("second").await;
        assert_eq!(announcer.spoken(), vec!["first", "second"]);
    }
}
