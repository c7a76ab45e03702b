//! Command-line configuration.

use clap::Parser;
use pathviz_core::Scene;
use pathviz_search::AlgorithmKind;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::pacer::{MAX_SPEED, MIN_SPEED};

pub const MIN_SIZE: i32 = 10;
pub const MAX_SIZE: i32 = 100;

/// Step through BFS, DFS, greedy best-first and A* on a grid.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "pathviz", version, about)]
pub struct Config {
    /// Grid width and height in cells.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(10..=100))]
    pub size: i32,

    /// Algorithm to run: bfs, dfs, greedy or astar.
    #[arg(short, long, default_value = "astar")]
    pub algorithm: AlgorithmKind,

    /// Search steps per second.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub speed: u32,

    /// Probability that a cell becomes a wall when walls are scattered.
    #[arg(long, default_value_t = 0.3, value_parser = parse_density)]
    pub density: f64,

    /// Seed for wall scattering; random if omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Scatter walls at startup.
    #[arg(long)]
    pub maze: bool,

    /// Run to completion without a terminal UI and print statistics.
    #[arg(long)]
    pub headless: bool,

    /// With --headless, run all four algorithms on the same grid.
    #[arg(long, requires = "headless")]
    pub compare: bool,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let d: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&d) {
        Ok(d)
    } else {
        Err(format!("{d} is not between 0 and 1"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 30,
            algorithm: AlgorithmKind::Astar,
            speed: 30,
            density: 0.3,
            seed: None,
            maze: false,
            headless: false,
            compare: false,
        }
    }
}

impl Config {
    /// The RNG used for wall scattering.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// The starting scene, with walls scattered if `--maze` was given.
    pub fn scene(&self, rng: &mut StdRng) -> Scene {
        let mut scene = Scene::new(self.size, self.size);
        if self.maze {
            let walls = scene.scatter_walls(rng, self.density);
            log::debug!("scattered {walls} walls at density {}", self.density);
        }
        scene
    }

    /// Clamp values that bypassed argument parsing.
    pub fn sanitized(mut self) -> Self {
        let size = self.size.clamp(MIN_SIZE, MAX_SIZE);
        if size != self.size {
            log::warn!("grid size {} out of range, using {size}", self.size);
            self.size = size;
        }
        let speed = self.speed.clamp(MIN_SPEED, MAX_SPEED);
        if speed != self.speed {
            log::warn!("speed {} out of range, using {speed}", self.speed);
            self.speed = speed;
        }
        if !(0.0..=1.0).contains(&self.density) {
            log::warn!("density {} out of range, using 0.3", self.density);
            self.density = 0.3;
        }
        self
    }
}
