//! Keyboard surface: "s" starts detection, Escape stops it, "q" quits.
//!
//! The bindings live entirely here; the session itself only exposes plain
//! `start()`/`stop()` operations.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Start,
    Stop,
    Quit,
}

/// Spawn a blocking reader thread translating key presses into commands.
/// The thread exits when the receiver side is dropped.
pub fn spawn_key_listener(tx: mpsc::Sender<KeyCommand>) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("key-listener".to_string())
        .spawn(move || loop {
            match event::poll(Duration::from_millis(200)) {
                Ok(true) => {
                    let Ok(ev) = event::read() else { continue };
                    if let Event::Key(key) = ev {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        let command = match key.code {
                            KeyCode::Char('s') | KeyCode::Char('S') => Some(KeyCommand::Start),
                            KeyCode::Esc => Some(KeyCommand::Stop),
                            KeyCode::Char('q') => Some(KeyCommand::Quit),
                            KeyCode::Char('c')
                                if key.modifiers.contains(KeyModifiers::CONTROL) =>
                            {
                                Some(KeyCommand::Quit)
                            }
                            _ => None,
                        };
                        if let Some(command) = command {
                            debug!(?command, "key command");
                            if tx.blocking_send(command).is_err() {
                                return;
                            }
                        }
                    }
                }
                Ok(false) => {
                    if tx.is_closed() {
                        return;
                    }
                }
                Err(_) => return,
            }
        })
        .expect("failed to spawn key listener thread")
}
