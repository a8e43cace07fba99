use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::{
    thread,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Terminal input and ticks, delivered over a channel.
///
/// A background thread owns the blocking `crossterm` poll and exits on its
/// own once the receiving side is dropped.
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<AppEvent>,
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        thread::spawn(move || poll_terminal(sender, tick_rate));
        Self {
            receiver,
            tick_rate,
        }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.receiver.recv().await
    }
}

fn poll_terminal(sender: mpsc::UnboundedSender<AppEvent>, tick_rate: Duration) {
    let mut last_tick = Instant::now();

    loop {
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        match event::poll(timeout) {
            Ok(true) => {
                let forwarded = match event::read() {
                    // Ignore key release/repeat reports from terminals that send them
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        sender.send(AppEvent::Key(key))
                    }
                    Ok(Event::Resize(width, height)) => sender.send(AppEvent::Resize(width, height)),
                    Ok(_) => Ok(()),
                    Err(e) => {
                        tracing::warn!("failed to read terminal event: {}", e);
                        return;
                    }
                };
                if forwarded.is_err() {
                    return;
                }
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("failed to poll terminal events: {}", e);
                return;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if sender.send(AppEvent::Tick).is_err() {
                return;
            }
            last_tick = Instant::now();
        }
    }
}
