//! espeak / espeak-ng subprocess backend.

use crate::announcer::SpeechAnnouncer;
use async_trait::async_trait;
use tokio::process::Command;

pub struct EspeakAnnouncer {
    command: String,
    /// Speaking rate in words per minute.
    rate: u32,
}

impl EspeakAnnouncer {
    /// Probe for an installed espeak binary. Returns `None` when neither
    /// `espeak` nor `espeak-ng` is available; callers fall back to the
    /// no-op announcer.
    pub async fn detect() -> Option<Self> {
        for command in ["espeak", "espeak-ng"] {
            if Command::new(command)
                .arg("--version")
                .output()
                .await
                .is_ok()
            {
                tracing::info!(command, "speech backend detected");
                return Some(Self {
                    command: command.to_string(),
                    rate: 160,
                });
            }
        }
        tracing::warn!("no espeak binary found; speech output unavailable");
        None
    }

    pub fn with_rate(mut self, rate: u32) -> Self {
        self.rate = rate;
        self
    }
}

#[async_trait]
impl SpeechAnnouncer for EspeakAnnouncer {
    async fn say(&self, text: &str) {
        // Fire and forget: the child runs to completion on its own and any
        // spawn failure is logged, never surfaced.
        match Command::new(&self.command)
            .arg("-s")
            .arg(self.rate.to_string())
            .arg(text)
            .spawn()
        {
            Ok(mut child) => {
                let text = text.to_string();
                tokio::spawn(async move {
                    if let Err(e) = child.wait().await {
                        tracing::warn!(error = %e, text, "espeak process failed");
                    }
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, text, "failed to spawn espeak");
            }
        }
    }
}
