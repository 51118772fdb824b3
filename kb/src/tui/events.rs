//! TUI event handling
//!
//! Async-compatible event handling using a blocking poll thread that feeds
//! a tokio channel.

use std::time::Duration;

use crossterm::event::{self, KeyEvent};
use eyre::Result;
use tokio::sync::mpsc;
use tracing::debug;

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick (periodic refresh)
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    /// Event receiver
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        debug!(?tick_rate, "EventHandler::new: called");
        let (tx, rx) = mpsc::unbounded_channel();

        // Spawn event polling in a blocking thread
        std::thread::spawn(move || {
            debug!("EventHandler: polling thread started");
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            event::Event::Key(key) => Event::Key(key),
                            event::Event::Resize(w, h) => Event::Resize(w, h),
                            _ => continue,
                        };

                        if tx.send(event).is_err() {
                            debug!("EventHandler: channel closed, exiting loop");
                            break;
                        }
                    }
                } else if tx.send(Event::Tick).is_err() {
                    debug!("EventHandler: channel closed on tick, exiting loop");
                    break;
                }
            }
            debug!("EventHandler: polling thread exiting");
        });

        Self { rx }
    }

    /// Get the next event (async)
    pub async fn next(&mut self) -> Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| eyre::eyre!("Event channel closed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_handler_creation() {
        let _handler = EventHandler::new(Duration::from_millis(100));
        // Handler should be created without panic
    }
}
