//! Non-interactive runs that print statistics instead of animating.

use std::io::{self, Write};

use pathviz_core::Scene;
use pathviz_search::{AlgorithmKind, Runner, SearchError, Stats, Status};

use crate::config::Config;

/// Run `kinds` to completion on `scene`, one after another.
pub fn run_all(scene: &Scene, kinds: &[AlgorithmKind]) -> Result<Vec<Stats>, SearchError> {
    kinds
        .iter()
        .map(|&kind| {
            let mut runner = Runner::from_scene(kind, scene)?;
            runner.run_to_end();
            Ok(runner.stats())
        })
        .collect()
}

fn outcome(status: Status) -> &'static str {
    match status {
        Status::Running => "running",
        Status::Found => "found",
        Status::NoPath => "no path",
    }
}

/// Write one line per run as an aligned table.
pub fn write_table<W: Write>(out: &mut W, stats: &[Stats]) -> io::Result<()> {
    writeln!(
        out,
        "{:<8} {:<8} {:>8} {:>6} {:>6} {:>8}",
        "algo", "result", "expanded", "steps", "path", "ms"
    )?;
    for s in stats {
        writeln!(
            out,
            "{:<8} {:<8} {:>8} {:>6} {:>6} {:>8}",
            s.algorithm.label(),
            outcome(s.status),
            s.expanded,
            s.steps,
            s.path_len,
            s.elapsed_ms()
        )?;
    }
    Ok(())
}

/// Build the configured scene and report on the configured algorithm, or on
/// all of them with `--compare`.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<(), Box<dyn std::error::Error>> {
    let scene = config.scene(&mut config.rng());
    let kinds: &[AlgorithmKind] = if config.compare {
        &AlgorithmKind::ALL
    } else {
        std::slice::from_ref(&config.algorithm)
    };
    let stats = run_all(&scene, kinds)?;
    write_table(out, &stats)?;
    Ok(())
}
