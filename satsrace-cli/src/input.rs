use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io;
use std::time::Duration;

/// What a key press means on the race screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tap,
    Continue,
    GiveUp,
    Other,
    /// No more input will arrive
    Closed,
}

pub trait KeySource {
    fn read_key(&mut self) -> io::Result<Key>;

    /// Throw away everything pressed so far. Returns how many presses were
    /// dropped.
    fn drain(&mut self) -> io::Result<usize>;
}

/// Single key presses straight from the terminal. Raw mode stays on for as
/// long as this value lives.
pub struct TerminalKeys {
    _private: (),
}

impl TerminalKeys {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                return classify(&key);
            }
        }
    }

    fn drain(&mut self) -> io::Result<usize> {
        let mut dropped = 0;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                // Ctrl-C still has to get through
                classify(&key)?;
                dropped += 1;
            }
        }
        Ok(dropped)
    }
}

/// Space taps, Enter continues, `q` or Esc gives up, Ctrl-D ends input.
/// Ctrl-C aborts since raw mode swallows the signal.
fn classify(key: &KeyEvent) -> io::Result<Key> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('d') {
        return Ok(Key::Closed);
    }

    Ok(match key.code {
        KeyCode::Char(' ') => Key::Tap,
        KeyCode::Enter => Key::Continue,
        KeyCode::Char('q') | KeyCode::Esc => Key::GiveUp,
        _ => Key::Other,
    })
}
