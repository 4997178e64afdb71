use async_trait::async_trait;

/// Speech output for detection announcements.
///
/// `say` is best-effort and fire-and-forget: it never fails and never blocks
/// on playback. Queuing policy: utterances are handed to the platform as
/// they arrive, so a later call may start while an earlier one is still
/// playing; the backends do not serialize playback. Unsupported platforms
/// degrade to a silent no-op.
#[async_trait]
pub trait SpeechAnnouncer: Send + Sync {
    async fn say(&self, text: &str);
}
