//! The interactive visualizer: grid editing, run control and rendering.

use std::fmt;
use std::time::Instant;

use pathviz_core::{Point, Scene, Tile};
use pathviz_search::{AlgorithmKind, Runner, Status};
use rand::rngs::StdRng;

use crate::app::{Effect, Model};
use crate::config::Config;
use crate::messages::{Key, Msg, MouseAction};
use crate::pacer::{Pacer, TickRate};
use crate::screen::{Color, Glyph, Screen};

/// Grid sizes reachable with `[` and `]`.
pub const SIZES: [i32; 7] = [10, 20, 30, 40, 50, 75, 100];

/// Terminal columns per board cell.
pub const CELL_WIDTH: i32 = 2;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

pub const EMPTY: Color = Color::from_rgb(0x1d, 0x21, 0x2b);
pub const WALL: Color = Color::from_rgb(0x6b, 0x72, 0x80);
pub const VISITED: Color = Color::from_rgb(0x2c, 0x4a, 0x7c);
pub const FRONTIER: Color = Color::from_rgb(0x38, 0xa8, 0xd8);
pub const PATH: Color = Color::from_rgb(0xf2, 0xc9, 0x4c);
pub const START: Color = Color::from_rgb(0x3f, 0xb9, 0x50);
pub const GOAL: Color = Color::from_rgb(0xe0, 0x45, 0x3a);
const TEXT: Color = Color::from_rgb(0xd8, 0xdc, 0xe4);
const MARK: Color = Color::from_rgb(0xff, 0xff, 0xff);

// ---------------------------------------------------------------------------
// Tool
// ---------------------------------------------------------------------------

/// What a left click does to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Wall,
    Erase,
    Start,
    Goal,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wall => "wall",
            Self::Erase => "erase",
            Self::Start => "start",
            Self::Goal => "goal",
        })
    }
}

/// Next size up (or down) in [`SIZES`], or `current` at either end.
fn next_size(current: i32, larger: bool) -> i32 {
    let found = if larger {
        SIZES.iter().copied().find(|&s| s > current)
    } else {
        SIZES.iter().rev().copied().find(|&s| s < current)
    };
    found.unwrap_or(current)
}

// ---------------------------------------------------------------------------
// Visualizer
// ---------------------------------------------------------------------------

pub struct Visualizer {
    scene: Scene,
    runner: Option<Runner>,
    kind: AlgorithmKind,
    tool: Tool,
    paused: bool,
    pacer: Pacer,
    density: f64,
    rng: StdRng,
    /// Left button held.
    drawing: bool,
    last_cell: Option<Point>,
    tick_rate: TickRate,
}

impl Visualizer {
    pub fn new(config: &Config) -> Self {
        let mut rng = config.rng();
        let scene = config.scene(&mut rng);
        Self {
            scene,
            runner: None,
            kind: config.algorithm,
            tool: Tool::default(),
            paused: false,
            pacer: Pacer::new(config.speed),
            density: config.density,
            rng,
            drawing: false,
            last_cell: None,
            tick_rate: TickRate::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn runner(&self) -> Option<&Runner> {
        self.runner.as_ref()
    }

    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> u32 {
        self.pacer.speed()
    }

    /// `Ready`, `Running: <algorithm>`, `Paused` or `Done`.
    pub fn state_label(&self) -> String {
        match &self.runner {
            None => "Ready".to_string(),
            Some(r) if r.is_done() => "Done".to_string(),
            Some(_) if self.paused => "Paused".to_string(),
            Some(r) => format!("Running: {}", r.kind()),
        }
    }

    // -- run control --------------------------------------------------------

    /// Start a fresh, unpaused run of the selected algorithm.
    fn run(&mut self) {
        match Runner::from_scene(self.kind, &self.scene) {
            Ok(runner) => {
                self.runner = Some(runner);
                self.paused = false;
                self.pacer.reset();
            }
            Err(e) => log::warn!("cannot start {}: {e}", self.kind),
        }
    }

    /// Advance by exactly one step. An idle visualizer gets a new, paused
    /// run first.
    fn step_once(&mut self) {
        if self.runner.is_none() {
            match Runner::from_scene(self.kind, &self.scene) {
                Ok(runner) => {
                    self.runner = Some(runner);
                    self.paused = true;
                }
                Err(e) => {
                    log::warn!("cannot start {}: {e}", self.kind);
                    return;
                }
            }
        }
        if let Some(r) = self.runner.as_mut() {
            r.step();
        }
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if !self.paused {
            self.pacer.reset();
        }
    }

    fn reset(&mut self) {
        self.runner = None;
        self.paused = false;
    }

    fn on_tick(&mut self, now: Instant) {
        self.tick_rate.tick(now);
        if self.paused {
            return;
        }
        let Some(r) = self.runner.as_mut() else {
            return;
        };
        if r.is_done() {
            return;
        }
        for _ in 0..self.pacer.due(now) {
            if r.step().is_done() {
                break;
            }
        }
    }

    // -- editing ------------------------------------------------------------

    fn resize(&mut self, larger: bool) {
        let current = self.scene.board.width();
        let size = next_size(current, larger);
        if size == current {
            return;
        }
        self.scene.resize(size, size);
        self.reset();
        log::debug!("grid resized to {size}x{size}");
    }

    fn scatter(&mut self) {
        let walls = self.scene.scatter_walls(&mut self.rng, self.density);
        log::debug!("scattered {walls} walls at density {}", self.density);
    }

    /// Board cell under a screen position.
    fn cell_at(&self, pos: Point) -> Option<Point> {
        if pos.x < 0 {
            return None;
        }
        let cell = Point::new(pos.x / CELL_WIDTH, pos.y);
        self.scene.board.contains(cell).then_some(cell)
    }

    fn apply(&mut self, tool: Tool, cell: Point) {
        let (start, goal) = (self.scene.start(), self.scene.goal());
        match tool {
            Tool::Wall if cell == start || cell == goal => {
                log::warn!("cannot place a wall on an endpoint at {cell}");
            }
            Tool::Wall => {
                self.scene.board.set_tile(cell, Tile::Wall);
            }
            Tool::Erase => {
                self.scene.board.set_tile(cell, Tile::Open);
            }
            Tool::Start if cell == goal => log::warn!("start cannot overlap the goal at {cell}"),
            Tool::Start => {
                self.scene.set_start(cell);
            }
            Tool::Goal if cell == start => log::warn!("goal cannot overlap the start at {cell}"),
            Tool::Goal => {
                self.scene.set_goal(cell);
            }
        }
    }

    fn on_mouse(&mut self, action: MouseAction, pos: Point) {
        match action {
            MouseAction::Main => {
                self.drawing = true;
                self.last_cell = None;
                self.paint(pos);
            }
            MouseAction::Move if self.drawing => self.paint(pos),
            MouseAction::Release => {
                self.drawing = false;
                self.last_cell = None;
            }
            MouseAction::Secondary => {
                if let Some(cell) = self.cell_at(pos) {
                    self.apply(Tool::Erase, cell);
                }
            }
            MouseAction::Move | MouseAction::Auxiliary => {}
        }
    }

    /// Apply the active tool under `pos`, skipping repeats on the same cell.
    fn paint(&mut self, pos: Point) {
        let Some(cell) = self.cell_at(pos) else {
            return;
        };
        if self.last_cell == Some(cell) {
            return;
        }
        self.last_cell = Some(cell);
        self.apply(self.tool, cell);
    }

    fn on_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Escape | Key::Char('q') => return Some(Effect::End),
            Key::Char('w') => self.tool = Tool::Wall,
            Key::Char('e') => self.tool = Tool::Erase,
            Key::Char('s') => self.tool = Tool::Start,
            Key::Char('g') => self.tool = Tool::Goal,
            Key::Tab => self.kind = self.kind.next(),
            Key::Enter | Key::Char('r') => self.run(),
            Key::Space | Key::Char('p') => self.toggle_pause(),
            Key::Char('n') | Key::Char('.') => self.step_once(),
            Key::Char('x') => self.reset(),
            Key::Char('c') => self.scene.board.clear(),
            Key::Char('m') => self.scatter(),
            Key::Char('+') | Key::Char('=') => self.pacer.faster(),
            Key::Char('-') => self.pacer.slower(),
            Key::Char('[') => self.resize(false),
            Key::Char(']') => self.resize(true),
            _ => {}
        }
        None
    }

    // -- rendering ----------------------------------------------------------

    fn paint_cell(screen: &mut Screen, cell: Point, glyph: Glyph) {
        let x = cell.x * CELL_WIDTH;
        screen.set(Point::new(x, cell.y), glyph);
        screen.set(Point::new(x + 1, cell.y), Glyph { ch: ' ', ..glyph });
    }

    fn stats_line(&self) -> String {
        let state = self.state_label();
        let Some(r) = &self.runner else {
            return state;
        };
        let s = r.stats();
        let path = match s.status {
            Status::NoPath => "none".to_string(),
            _ => s.path_len.to_string(),
        };
        format!(
            "{state}  expanded {}  frontier {}  path {path}  {} ms",
            s.expanded,
            s.frontier,
            s.elapsed_ms()
        )
    }

    fn settings_line(&self) -> String {
        format!(
            "algorithm {}  tool {}  speed {}/s  size {}  {} ticks/s",
            self.kind,
            self.tool,
            self.pacer.speed(),
            self.scene.board.width(),
            self.tick_rate.rate()
        )
    }
}

const HELP: &str = "w/e/s/g tool  tab algorithm  enter run  space pause  n step  \
                    x reset  c clear  m maze  +/- speed  [/] size  q quit";

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::KeyDown { key, .. } => return self.on_key(key),
            Msg::Mouse { action, pos, .. } => self.on_mouse(action, pos),
            Msg::Tick(now) => self.on_tick(now),
            Msg::Quit => return Some(Effect::End),
            Msg::Init | Msg::Screen { .. } => {}
        }
        None
    }

    fn draw(&self, screen: &mut Screen) {
        let board = &self.scene.board;
        for (p, tile) in board.iter() {
            let bg = if tile.is_passable() { EMPTY } else { WALL };
            Self::paint_cell(screen, p, Glyph::block(bg));
        }

        if let Some(r) = &self.runner {
            let snap = r.snapshot();
            for &p in &snap.visited {
                Self::paint_cell(screen, p, Glyph::block(VISITED));
            }
            for &p in &snap.frontier {
                Self::paint_cell(screen, p, Glyph::block(FRONTIER));
            }
            for &p in r.path().unwrap_or_default() {
                Self::paint_cell(screen, p, Glyph::block(PATH));
            }
        }

        let endpoints = [(self.scene.start(), 'S', START), (self.scene.goal(), 'G', GOAL)];
        for (p, ch, bg) in endpoints {
            Self::paint_cell(screen, p, Glyph { ch, fg: MARK, bg });
        }

        let y = board.height();
        screen.print(Point::new(0, y), &self.stats_line(), TEXT, Color::DEFAULT);
        screen.print(Point::new(0, y + 1), &self.settings_line(), TEXT, Color::DEFAULT);
        screen.print(Point::new(0, y + 2), HELP, WALL, Color::DEFAULT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn visualizer() -> Visualizer {
        Visualizer::new(&Config {
            size: 10,
            seed: Some(1),
            ..Config::default()
        })
    }

    fn press(v: &mut Visualizer, c: char) -> Option<Effect> {
        v.update(Msg::char(c))
    }

    fn click(v: &mut Visualizer, action: MouseAction, cell: Point) {
        v.update(Msg::mouse(action, Point::new(cell.x * CELL_WIDTH, cell.y)));
    }

    /// Tick once a second until the run is done.
    fn run_out(v: &mut Visualizer) {
        let t0 = Instant::now();
        for i in 0..1000 {
            v.update(Msg::Tick(t0 + Duration::from_secs(i)));
            if v.runner().is_some_and(Runner::is_done) {
                return;
            }
        }
        panic!("run did not finish");
    }

    #[test]
    fn starts_ready_with_configured_algorithm() {
        let v = visualizer();
        assert_eq!(v.state_label(), "Ready");
        assert_eq!(v.kind(), AlgorithmKind::Astar);
        assert_eq!(v.tool(), Tool::Wall);
        assert_eq!(v.scene().start(), Point::at(5, 2));
        assert_eq!(v.scene().goal(), Point::at(5, 7));
    }

    #[test]
    fn tool_keys_select_tools() {
        let mut v = visualizer();
        for (c, tool) in [('e', Tool::Erase), ('s', Tool::Start), ('g', Tool::Goal), ('w', Tool::Wall)] {
            press(&mut v, c);
            assert_eq!(v.tool(), tool);
        }
    }

    #[test]
    fn drag_paints_until_release() {
        let mut v = visualizer();
        click(&mut v, MouseAction::Main, Point::at(0, 0));
        click(&mut v, MouseAction::Move, Point::at(0, 1));
        click(&mut v, MouseAction::Release, Point::at(0, 1));
        click(&mut v, MouseAction::Move, Point::at(0, 2));
        let board = &v.scene().board;
        assert_eq!(board.tile(Point::at(0, 0)), Some(Tile::Wall));
        assert_eq!(board.tile(Point::at(0, 1)), Some(Tile::Wall));
        assert_eq!(board.tile(Point::at(0, 2)), Some(Tile::Open));
    }

    #[test]
    fn odd_columns_map_to_the_same_cell() {
        let mut v = visualizer();
        v.update(Msg::mouse(MouseAction::Main, Point::new(7, 1)));
        assert_eq!(v.scene().board.tile(Point::at(1, 3)), Some(Tile::Wall));
        // Past the right edge of the board.
        v.update(Msg::mouse(MouseAction::Main, Point::new(40, 1)));
        assert_eq!(v.scene().board.count(Tile::Wall), 1);
    }

    #[test]
    fn right_click_erases() {
        let mut v = visualizer();
        click(&mut v, MouseAction::Main, Point::at(3, 3));
        click(&mut v, MouseAction::Release, Point::at(3, 3));
        click(&mut v, MouseAction::Secondary, Point::at(3, 3));
        assert_eq!(v.scene().board.tile(Point::at(3, 3)), Some(Tile::Open));
    }

    #[test]
    fn walls_never_cover_endpoints() {
        let mut v = visualizer();
        let start = v.scene().start();
        click(&mut v, MouseAction::Main, start);
        assert!(v.scene().board.is_passable(start));
    }

    #[test]
    fn start_and_goal_tools_move_endpoints() {
        let mut v = visualizer();
        press(&mut v, 's');
        click(&mut v, MouseAction::Main, Point::at(0, 0));
        click(&mut v, MouseAction::Release, Point::at(0, 0));
        assert_eq!(v.scene().start(), Point::at(0, 0));

        press(&mut v, 'g');
        click(&mut v, MouseAction::Main, Point::at(0, 0));
        assert_eq!(v.scene().goal(), Point::at(5, 7), "goal must not land on start");
        click(&mut v, MouseAction::Move, Point::at(9, 9));
        assert_eq!(v.scene().goal(), Point::at(9, 9));
    }

    #[test]
    fn run_animates_to_done() {
        let mut v = visualizer();
        v.update(Msg::key(Key::Enter));
        assert_eq!(v.state_label(), "Running: A*");
        run_out(&mut v);
        assert_eq!(v.state_label(), "Done");
        let r = v.runner().unwrap();
        assert_eq!(r.status(), Status::Found);
        assert_eq!(r.path_len(), 5);
    }

    #[test]
    fn first_tick_does_not_step() {
        let mut v = visualizer();
        press(&mut v, 'r');
        v.update(Msg::Tick(Instant::now()));
        assert_eq!(v.runner().map(Runner::steps), Some(0));
    }

    #[test]
    fn pause_holds_the_run() {
        let mut v = visualizer();
        press(&mut v, 'r');
        v.update(Msg::key(Key::Space));
        assert_eq!(v.state_label(), "Paused");
        let t0 = Instant::now();
        v.update(Msg::Tick(t0));
        v.update(Msg::Tick(t0 + Duration::from_secs(5)));
        assert_eq!(v.runner().map(Runner::steps), Some(0));
        press(&mut v, 'p');
        assert_eq!(v.state_label(), "Running: A*");
    }

    #[test]
    fn single_step_from_idle_creates_a_paused_run() {
        let mut v = visualizer();
        press(&mut v, 'n');
        assert!(v.is_paused());
        assert_eq!(v.runner().map(Runner::steps), Some(1));
        press(&mut v, '.');
        assert_eq!(v.runner().map(Runner::steps), Some(2));
    }

    #[test]
    fn reset_returns_to_ready() {
        let mut v = visualizer();
        press(&mut v, 'r');
        press(&mut v, 'x');
        assert!(v.runner().is_none());
        assert_eq!(v.state_label(), "Ready");
    }

    #[test]
    fn tab_cycles_algorithms() {
        let mut v = visualizer();
        v.update(Msg::key(Key::Tab));
        assert_eq!(v.kind(), AlgorithmKind::Bfs);
        v.update(Msg::key(Key::Tab));
        assert_eq!(v.kind(), AlgorithmKind::Dfs);
    }

    #[test]
    fn no_path_run_ends_done() {
        let mut v = visualizer();
        for row in 0..10 {
            click(&mut v, MouseAction::Main, Point::at(row, 5));
        }
        press(&mut v, 'r');
        run_out(&mut v);
        assert_eq!(v.runner().map(Runner::status), Some(Status::NoPath));
        assert!(v.stats_line().contains("path none"));
    }

    #[test]
    fn clear_and_maze() {
        let mut v = visualizer();
        press(&mut v, 'm');
        assert!(v.scene().board.count(Tile::Wall) > 0);
        let (start, goal) = (v.scene().start(), v.scene().goal());
        assert!(v.scene().board.is_passable(start) && v.scene().board.is_passable(goal));
        press(&mut v, 'c');
        assert_eq!(v.scene().board.count(Tile::Wall), 0);
    }

    #[test]
    fn size_keys_step_through_sizes_and_drop_the_run() {
        let mut v = visualizer();
        press(&mut v, 'r');
        press(&mut v, ']');
        assert_eq!(v.scene().board.width(), 20);
        assert!(v.runner().is_none());
        press(&mut v, '[');
        press(&mut v, '[');
        assert_eq!(v.scene().board.width(), 10);
    }

    #[test]
    fn next_size_handles_off_list_values() {
        assert_eq!(next_size(33, true), 40);
        assert_eq!(next_size(33, false), 30);
        assert_eq!(next_size(100, true), 100);
        assert_eq!(next_size(10, false), 10);
    }

    #[test]
    fn speed_keys() {
        let mut v = visualizer();
        press(&mut v, '+');
        assert_eq!(v.speed(), 60);
        press(&mut v, '-');
        press(&mut v, '-');
        assert_eq!(v.speed(), 15);
    }

    #[test]
    fn settings_line_shows_tick_rate() {
        let mut v = visualizer();
        assert!(v.settings_line().ends_with("0 ticks/s"));
        let t0 = Instant::now();
        for ms in (0..=1000).step_by(100) {
            v.update(Msg::Tick(t0 + Duration::from_millis(ms)));
        }
        assert!(v.settings_line().ends_with("11 ticks/s"), "{}", v.settings_line());
    }

    #[test]
    fn quit_keys_end_the_app() {
        let mut v = visualizer();
        assert_eq!(press(&mut v, 'q'), Some(Effect::End));
        assert_eq!(v.update(Msg::key(Key::Escape)), Some(Effect::End));
        assert_eq!(v.update(Msg::Quit), Some(Effect::End));
        assert_eq!(press(&mut v, 'w'), None);
    }

    #[test]
    fn draw_shows_endpoints_path_and_status() {
        let mut v = visualizer();
        let mut screen = Screen::new(40, 14);
        v.draw(&mut screen);
        let start = v.scene().start();
        let cell = screen.at(Point::new(start.x * CELL_WIDTH, start.y)).unwrap();
        assert_eq!((cell.ch, cell.bg), ('S', START));
        assert_eq!(screen.at(Point::new(start.x * CELL_WIDTH + 1, start.y)).map(|g| g.bg), Some(START));
        assert_eq!(screen.at(Point::new(0, 0)).map(|g| g.bg), Some(EMPTY));
        let status: String = (0..5).filter_map(|x| screen.at(Point::new(x, 10))).map(|g| g.ch).collect();
        assert_eq!(status, "Ready");

        press(&mut v, 'r');
        run_out(&mut v);
        v.draw(&mut screen);
        let mid = Point::at(5, 4);
        assert_eq!(screen.at(Point::new(mid.x * CELL_WIDTH, mid.y)).map(|g| g.bg), Some(PATH));
    }
}
