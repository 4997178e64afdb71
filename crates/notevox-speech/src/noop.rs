use crate::announcer::SpeechAnnouncer;
use async_trait::async_trait;

/// Silent announcer for platforms without speech support.
#[derive(Debug, Clone, Default)]
pub struct NoopAnnouncer;

impl NoopAnnouncer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SpeechAnnouncer for NoopAnnouncer {
    async fn say(&self, text: &str) {
        tracing::debug!(text, "speech disabled, dropping announcement");
    }
}
