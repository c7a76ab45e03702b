//! Crossterm terminal driver.
//!
//! [`CrosstermDriver`] implements [`Driver`] by mapping the screen buffer to
//! a raw-mode alternate screen and translating crossterm events to [`Msg`]s.

use std::error::Error;
use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathviz_core::Point;

use crate::app::{Context, Driver};
use crate::messages::{Key, Msg, MouseAction};
use crate::screen::{Color, Frame};

/// How long one poll waits for the first event.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Tab => Some(Key::Tab),
        _ => None,
    }
}

fn key_msg(ev: KeyEvent, time: Instant) -> Option<Msg> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }
    // Raw mode swallows SIGINT.
    if ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Msg::Quit);
    }
    to_key(ev.code).map(|key| Msg::KeyDown { key, time })
}

fn mouse_msg(ev: MouseEvent, time: Instant) -> Option<Msg> {
    let action = match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
        MouseEventKind::Down(MouseButton::Right) => MouseAction::Secondary,
        MouseEventKind::Down(MouseButton::Middle) => MouseAction::Auxiliary,
        MouseEventKind::Up(_) => MouseAction::Release,
        MouseEventKind::Moved | MouseEventKind::Drag(_) => MouseAction::Move,
        _ => return None,
    };
    Some(Msg::Mouse {
        action,
        pos: Point::new(i32::from(ev.column), i32::from(ev.row)),
        time,
    })
}

/// A terminal back-end using crossterm. Mouse capture is always on.
#[derive(Debug, Default)]
pub struct CrosstermDriver;

impl CrosstermDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        Ok(())
    }

    fn poll_msgs(&mut self, ctx: &Context, tx: Sender<Msg>) -> Result<(), Box<dyn Error>> {
        if !event::poll(POLL_TIMEOUT)? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            let now = Instant::now();
            let msg = match event::read()? {
                Event::Key(ev) => key_msg(ev, now),
                Event::Mouse(ev) => mouse_msg(ev, now),
                Event::Resize(w, h) => Some(Msg::Screen {
                    width: i32::from(w),
                    height: i32::from(h),
                    time: now,
                }),
                _ => None,
            };
            if let Some(m) = msg {
                tx.send(m).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>> {
        let mut stdout = io::stdout().lock();
        if frame.clear {
            queue!(stdout, ResetColor, terminal::Clear(ClearType::All))?;
        }

        let mut colors = None;
        for fc in &frame.cells {
            let (Ok(x), Ok(y)) = (u16::try_from(fc.pos.x), u16::try_from(fc.pos.y)) else {
                continue;
            };
            let g = fc.glyph;
            queue!(stdout, cursor::MoveTo(x, y))?;
            if colors != Some((g.fg, g.bg)) {
                queue!(
                    stdout,
                    SetForegroundColor(to_ct_color(g.fg)),
                    SetBackgroundColor(to_ct_color(g.bg))
                )?;
                colors = Some((g.fg, g.bg));
            }
            queue!(stdout, Print(g.ch))?;
        }

        queue!(stdout, ResetColor)?;
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, event::DisableMouseCapture);
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
