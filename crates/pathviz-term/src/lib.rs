//! Terminal front-end for pathviz.
//!
//! An Elm-style loop ([`App`]) feeds input and clock ticks to the
//! [`Visualizer`] model, draws it into an off-screen [`Screen`], and flushes
//! only the changed glyphs through a [`CrosstermDriver`].

pub mod app;
pub mod config;
pub mod driver;
pub mod headless;
pub mod messages;
pub mod pacer;
pub mod screen;
pub mod visualizer;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use config::Config;
pub use driver::CrosstermDriver;
pub use messages::{Key, MouseAction, Msg};
pub use pacer::Pacer;
pub use screen::{Color, Frame, FrameCell, Glyph, Screen, compute_frame};
pub use visualizer::{Tool, Visualizer};
