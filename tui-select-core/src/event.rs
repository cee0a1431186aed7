//! Event model and terminal event polling

use std::time::Duration;

use crossterm::event::{self, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// The event payload handed to components
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse click/drag/move event
    Mouse(MouseEvent),
    /// Scroll wheel with position and delta (positive = down)
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
}

impl EventKind {
    /// Cell position of a left-button press, if this event is one
    pub fn click_position(&self) -> Option<(u16, u16)> {
        match self {
            EventKind::Mouse(mouse)
                if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) =>
            {
                Some((mouse.column, mouse.row))
            }
            _ => None,
        }
    }

    /// Whether this is a key press (release/repeat reports are ignored)
    pub fn is_key_press(&self) -> bool {
        matches!(self, EventKind::Key(key) if key.kind == event::KeyEventKind::Press)
    }
}

/// Convert a raw event into the component-facing `EventKind`
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}

/// Spawn the event polling task with cancellation support
///
/// Polls crossterm for input and forwards key, mouse and resize events
/// through `tx` until `cancel_token` fires or the receiver goes away.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) => RawEvent::Key(key),
                            Ok(event::Event::Mouse(mouse)) => RawEvent::Mouse(mouse),
                            Ok(event::Event::Resize(w, h)) => RawEvent::Resize(w, h),
                            _ => continue,
                        };
                        if tx.send(raw).is_err() {
                            debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_scroll_is_split_out() {
        let event = process_raw_event(RawEvent::Mouse(mouse(MouseEventKind::ScrollUp, 3, 4)));
        assert!(matches!(
            event,
            EventKind::Scroll {
                column: 3,
                row: 4,
                delta: -1
            }
        ));
    }

    #[test]
    fn test_click_position() {
        let event = process_raw_event(RawEvent::Mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            7,
            2,
        )));
        assert_eq!(event.click_position(), Some((7, 2)));

        let moved = EventKind::Mouse(mouse(MouseEventKind::Moved, 7, 2));
        assert_eq!(moved.click_position(), None);
    }
}
