//! **pathviz-core**: grid types shared by the pathviz search engine and its
//! front-ends.
//!
//! This crate provides geometry primitives, the editable passability
//! [`Board`], the [`Scene`] (board plus start and goal) with its ASCII layout
//! format, and random wall generation.

pub mod board;
pub mod geom;
pub mod mapgen;
pub mod scene;

pub use board::{Board, Tile};
pub use geom::{Point, Range};
pub use mapgen::MapGen;
pub use scene::{LayoutError, Scene};
