//! Terminal render sink: prints session snapshots as they change.
//!
//! Purely a reader of the session's watch channel; it never mutates
//! session state.

use crate::session::SessionSnapshot;
use notevox_foundation::StatusKind;
use std::io::{self, Write};
use tokio::sync::watch;

fn kind_tag(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Info => "INFO",
        StatusKind::Success => " OK ",
        StatusKind::Error => "FAIL",
        StatusKind::Warning => "WARN",
    }
}

fn render(snapshot: &SessionSnapshot) {
    let mut out = io::stdout();
    // Raw mode is active while the key listener runs, hence explicit \r\n.
    let _ = write!(
        out,
        "\r\n[{}] {}\r\n",
        kind_tag(snapshot.status.kind),
        snapshot.status.message
    );
    if !snapshot.detected_currency.is_empty() {
        let _ = write!(out, "  detected: {}\r\n", snapshot.detected_currency);
    }
    for prediction in &snapshot.predictions {
        if prediction.label.is_empty() {
            continue;
        }
        let bar_len = (prediction.confidence * 20.0).round() as usize;
        let _ = write!(
            out,
            "  {:<24} {:>5.2} {}\r\n",
            prediction.label,
            prediction.confidence,
            "#".repeat(bar_len)
        );
    }
    let _ = out.flush();
}

/// Run until the session's watch channel closes.
pub async fn run(mut rx: watch::Receiver<SessionSnapshot>) {
    render(&rx.borrow());
    loop {
        // Only status transitions are printed eagerly; prediction-only
        // updates are throttled to keep the terminal readable.
        if rx.changed().await.is_err() {
            return;
        }
        let snapshot = rx.borrow_and_update().clone();
        render(&snapshot);
        tokio::time::sleep(std::time::Duration::from_millis(250)).await;
    }
}
