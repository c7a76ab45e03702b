use std::error::Error;
use std::io;

use clap::Parser;
use pathviz_term::{App, AppConfig, Config, CrosstermDriver, Visualizer, headless};

fn run(config: Config) -> Result<(), Box<dyn Error>> {
    if config.headless {
        return headless::run(&config, &mut io::stdout().lock());
    }

    let (width, height) = crossterm::terminal::size()?;
    let mut app = App::new(AppConfig {
        model: Visualizer::new(&config),
        driver: CrosstermDriver::new(),
        width: i32::from(width),
        height: i32::from(height),
    });
    app.run()
}

fn main() {
    let config = Config::parse().sanitized();
    if let Err(e) = run(config) {
        eprintln!("pathviz: {e}");
        std::process::exit(1);
    }
}
