mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use event::HeadlessOptions;
use logging::LogTarget;
use sdg_port_radar::config::init_app_config;
use tracing::info;

fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config();

    let headless = args.wants_headless() || !is_terminal();
    let target = if headless {
        LogTarget::Stderr
    } else {
        LogTarget::File(&config.log_file)
    };
    logging::init_logging(target, config.debug)?;
    info!(
        indicators = %config.indicators_path.display(),
        scores = %config.scores_path.display(),
        ports = config.ports.len(),
        headless,
        "starting dashboard"
    );

    let mut app = App::new(config);

    if headless {
        return event::run_headless(&mut app, &HeadlessOptions::from(&args));
    }

    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut app);
    terminal::cleanup_terminal_state(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
