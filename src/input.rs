/// Discrete input events consumed by the state machine, and the background
/// poller that feeds them.
///
/// The poller owns every blocking terminal read. The main loop only ever
/// drains its channel with `try_recv`, so slow device reads never stall a
/// frame.

use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Space,
    Esc,
    Backspace,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize(u16, u16),
    /// Ctrl+C: leave immediately, whatever is on screen.
    Interrupt,
}

/// Map a raw terminal event onto an input event. Key releases and anything
/// the game has no use for map to `None`.
pub fn translate(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if kind == KeyEventKind::Release {
                return None;
            }
            if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                return Some(InputEvent::Interrupt);
            }
            let key = match code {
                KeyCode::Left => Key::Left,
                KeyCode::Right => Key::Right,
                KeyCode::Up => Key::Up,
                KeyCode::Down => Key::Down,
                KeyCode::Enter => Key::Enter,
                KeyCode::Esc => Key::Esc,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Char(' ') => Key::Space,
                KeyCode::Char(c) => Key::Char(c),
                _ => return None,
            };
            Some(InputEvent::Key(key))
        }
        Event::Resize(width, height) => Some(InputEvent::Resize(width, height)),
        _ => None,
    }
}

/// Dedicate a thread to blocking event reads, forwarding them through an
/// unbounded channel. The thread exits when the receiver is dropped or the
/// terminal stops producing events.
pub fn spawn_poller() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "input poller stopped");
                break;
            }
        }
    });
    rx
}
