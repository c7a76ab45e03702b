//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].

use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use crate::messages::Msg;
use crate::screen::{Frame, Screen, compute_frame};

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Signal the application loop to stop.
    End,
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `screen`.
    fn draw(&self, screen: &mut Screen);
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Terminal back-end.
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Poll for input messages, sending them through `tx`.
    ///
    /// Should return after a short wait even when there is no input, so the
    /// loop can keep ticking.
    fn poll_msgs(&mut self, ctx: &Context, tx: Sender<Msg>) -> Result<(), Box<dyn Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run the Model-View-Update loop.
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init` through the model.
    /// 3. Loops: poll → tick → update → draw → diff → flush.
    /// 4. Stops when the model returns `Effect::End`.
    ///
    /// The driver is closed on every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let result = self.run_loop();
        self.driver.close();
        result
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();

        let mut prev = Screen::new(self.width, self.height);
        let mut curr = Screen::new(self.width, self.height);

        tx.send(Msg::Init).ok();
        self.process_pending(&rx, &ctx, &mut prev, &mut curr)?;

        while !ctx.is_done() {
            self.driver.poll_msgs(&ctx, tx.clone())?;
            if ctx.is_done() {
                break;
            }
            tx.send(Msg::Tick(Instant::now())).ok();
            self.process_pending(&rx, &ctx, &mut prev, &mut curr)?;
        }
        log::debug!("application loop finished");
        Ok(())
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        prev: &mut Screen,
        curr: &mut Screen,
    ) -> Result<(), Box<dyn Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Msg::Screen { width, height, .. } = msg {
                self.width = width;
                self.height = height;
                *curr = Screen::new(width, height);
            }
            if let Some(Effect::End) = self.model.update(msg) {
                ctx.cancel();
                return Ok(());
            }
            needs_draw = true;
        }

        if needs_draw {
            curr.fill(Default::default());
            self.model.draw(curr);
            let frame = compute_frame(prev, curr);
            if frame.clear || !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            prev.clone_from(curr);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Key;
    use crate::screen::{Color, Glyph};
    use pathviz_core::Point;
    use std::collections::VecDeque;

    /// Counts keys and quits on `q`.
    #[derive(Default)]
    struct Counter {
        keys: usize,
        ticks: usize,
        init: bool,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::Init => self.init = true,
                Msg::Tick(_) => self.ticks += 1,
                Msg::KeyDown {
                    key: Key::Char('q'),
                    ..
                } => return Some(Effect::End),
                Msg::KeyDown { .. } => self.keys += 1,
                _ => {}
            }
            None
        }

        fn draw(&self, screen: &mut Screen) {
            let text = format!("{}", self.keys);
            screen.print(Point::new(0, 0), &text, Color::DEFAULT, Color::DEFAULT);
        }
    }

    /// Feeds one scripted batch per poll and records flushed frames.
    #[derive(Default)]
    struct Scripted {
        batches: VecDeque<Vec<Msg>>,
        frames: Vec<Frame>,
        closed: bool,
    }

    impl Driver for Scripted {
        fn init(&mut self) -> Result<(), Box<dyn Error>> {
            Ok(())
        }

        fn poll_msgs(&mut self, _ctx: &Context, tx: Sender<Msg>) -> Result<(), Box<dyn Error>> {
            let batch = self.batches.pop_front().unwrap_or_else(|| vec![Msg::char('q')]);
            for msg in batch {
                tx.send(msg).ok();
            }
            Ok(())
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>> {
            self.frames.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    fn app(batches: Vec<Vec<Msg>>) -> App<Counter, Scripted> {
        App::new(AppConfig {
            model: Counter::default(),
            driver: Scripted {
                batches: batches.into(),
                ..Default::default()
            },
            width: 4,
            height: 2,
        })
    }

    #[test]
    fn runs_until_the_model_ends() {
        let mut app = app(vec![vec![Msg::char('a')], vec![], vec![Msg::char('b')]]);
        app.run().unwrap();
        assert!(app.model().init);
        assert_eq!(app.model().keys, 2);
        assert_eq!(app.model().ticks, 3);
        assert!(app.driver().closed);
    }

    #[test]
    fn only_changed_cells_are_flushed() {
        let mut app = app(vec![vec![Msg::char('a')], vec![]]);
        app.run().unwrap();
        let frames = &app.driver().frames;
        // Init draws "0", the key redraws it as "1", the empty tick changes
        // nothing.
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].cells.len(), 1);
        assert_eq!(
            frames[1].cells[0].glyph,
            Glyph {
                ch: '1',
                fg: Color::DEFAULT,
                bg: Color::DEFAULT
            }
        );
    }

    #[test]
    fn resize_triggers_a_full_redraw() {
        let mut app = app(vec![vec![Msg::Screen {
            width: 6,
            height: 3,
            time: Instant::now(),
        }]]);
        app.run().unwrap();
        let last = app.driver().frames.last().unwrap();
        assert!(last.clear);
        assert_eq!((last.width, last.height), (6, 3));
        assert_eq!(last.cells.len(), 18);
    }
}
