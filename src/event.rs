use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event};

use crate::error::{GameError, Result};

/// Reads terminal events on a background thread and hands them to the frame
/// loop through a channel.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(poll_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let poll_rate = Duration::from_millis(poll_rate_ms);

        thread::spawn(move || loop {
            match event::poll(poll_rate) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            return;
                        }
                    }
                    Err(e) => log::warn!("terminal read failed: {e}"),
                },
                Ok(false) => {}
                Err(e) => {
                    log::warn!("terminal poll failed, input reader stopping: {e}");
                    return;
                }
            }
        });

        Self { rx }
    }

    /// Everything received since the last call, oldest first.
    pub fn drain(&self) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(ev) => events.push(ev),
                Err(TryRecvError::Empty) => return Ok(events),
                Err(TryRecvError::Disconnected) => {
                    if events.is_empty() {
                        return Err(GameError::InputDisconnected);
                    }
                    return Ok(events);
                }
            }
        }
    }
}
