//! Terminal backend built on crossterm
//!
//! Input model: a dedicated thread blocks on `event::read()` and forwards
//! everything through a channel so the game loop never blocks on I/O.
//! Held keys are tracked as "frame last seen": terminals with keyboard
//! enhancement report releases, classic terminals only repeat presses, so a
//! key also counts as released once it has been silent for `HOLD_WINDOW`
//! frames.

use std::collections::HashMap;
use std::io::{Stdout, stdout};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};
use glam::Vec2;

use super::{Platform, PlatformError, PlatformEvent};
use crate::sim::MoveKeys;

/// Frames a key stays held after its last press/repeat (~130 ms at 60 FPS)
const HOLD_WINDOW: u64 = 8;

/// Held-key bookkeeping, keyed by the frame each key was last seen
#[derive(Debug, Default)]
struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl KeyTracker {
    fn next_frame(&mut self) {
        self.frame += 1;
    }

    fn is_held(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|code| {
            self.key_frame
                .get(code)
                .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
        })
    }

    fn move_keys(&self) -> MoveKeys {
        MoveKeys {
            up: self.is_held(&[KeyCode::Char('w'), KeyCode::Up]),
            down: self.is_held(&[KeyCode::Char('s'), KeyCode::Down]),
            left: self.is_held(&[KeyCode::Char('a'), KeyCode::Left]),
            right: self.is_held(&[KeyCode::Char('d'), KeyCode::Right]),
        }
    }

    /// Record a key event; returns `Quit` for the quit keys
    fn handle_key(&mut self, key: KeyEvent) -> Option<PlatformEvent> {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = key;
        // Letters count regardless of shift state
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, self.frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => Some(PlatformEvent::Quit),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        Some(PlatformEvent::Quit)
                    }
                    _ => None,
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
                None
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
                None
            }
        }
    }
}

/// Centre of a terminal cell in logical screen coordinates
fn cell_to_screen(column: u16, row: u16, cells: (u16, u16), screen: Vec2) -> Vec2 {
    let cols = f32::from(cells.0.max(1));
    let rows = f32::from(cells.1.max(1));
    Vec2::new(
        (f32::from(column) + 0.5) * screen.x / cols,
        (f32::from(row) + 0.5) * screen.y / rows,
    )
}

pub struct TerminalPlatform {
    rx: Receiver<std::io::Result<Event>>,
    out: Stdout,
    keyboard_enhanced: bool,
    keys: KeyTracker,
    /// Terminal size in cells
    cells: (u16, u16),
    /// Logical screen size the pointer is mapped onto
    screen: Vec2,
    pointer: Vec2,
    started: Instant,
    last_frame: Instant,
}

impl TerminalPlatform {
    /// Take over the terminal: raw mode, alternate screen, mouse capture
    pub fn new(screen: Vec2) -> Result<Self, PlatformError> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        out.execute(EnableMouseCapture)?;

        // Ask for release events; terminals without the protocol just ignore it
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            loop {
                let ev = event::read();
                let failed = ev.is_err();
                if tx.send(ev).is_err() || failed {
                    break;
                }
            }
        });

        let cells = terminal::size()?;
        log::info!(
            "Terminal {}x{} cells, keyboard enhancement: {}",
            cells.0,
            cells.1,
            keyboard_enhanced
        );

        let now = Instant::now();
        Ok(Self {
            rx,
            out,
            keyboard_enhanced,
            keys: KeyTracker::default(),
            cells,
            screen,
            pointer: screen / 2.0,
            started: now,
            last_frame: now,
        })
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, events: &mut Vec<PlatformEvent>) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer = cell_to_screen(mouse.column, mouse.row, self.cells, self.screen);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.pointer = cell_to_screen(mouse.column, mouse.row, self.cells, self.screen);
                events.push(PlatformEvent::PointerDown(self.pointer));
            }
            _ => {}
        }
    }
}

impl Platform for TerminalPlatform {
    fn poll_events(&mut self) -> Result<Vec<PlatformEvent>, PlatformError> {
        self.keys.next_frame();
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(Ok(Event::Key(key))) => events.extend(self.keys.handle_key(key)),
                Ok(Ok(Event::Mouse(mouse))) => self.handle_mouse(mouse, &mut events),
                Ok(Ok(Event::Resize(cols, rows))) => self.cells = (cols, rows),
                Ok(Ok(_)) => {}
                Ok(Err(e)) => return Err(e.into()),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Err(PlatformError::InputClosed),
            }
        }
        Ok(events)
    }

    fn key_state(&self) -> MoveKeys {
        self.keys.move_keys()
    }

    fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    fn now_millis(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn wait_for_frame_budget(&mut self, target_fps: u32) -> f32 {
        let budget = Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1)));
        let elapsed = self.last_frame.elapsed();
        if elapsed < budget {
            thread::sleep(budget - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        // Always restore the terminal
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(DisableMouseCapture);
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
