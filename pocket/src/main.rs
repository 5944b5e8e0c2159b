use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use pocket::{audio_task, logging, shell};
use pocket_core::{config, console::Console};
use pocket_tui::{TerminalInput, TerminalScreen, Theme};

#[derive(Parser)]
#[command(version, about = "Handheld game console shell with built-in games")]
struct Cli {
    /// Override path to config file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = logging::DEFAULT_LOG_LEVEL)]
    log_level: log::LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.log_level)?;
    let config = config::load_config(cli.config.as_deref())?;

    let theme = Theme::from_config(&config.theme);
    let (sink, _audio_task) = audio_task::spawn();

    // The screen grabs the terminal; build it last so any config error above
    // prints normally.
    let screen = TerminalScreen::new(theme)?;
    let input = TerminalInput::new(config.input.poll_interval());
    let mut console = Console::new(
        Box::new(input),
        Box::new(screen),
        Rc::new(sink),
        config.display.visible_rows,
    );

    let settings = shell::Settings::new(config.audio.volume, config.audio.repeat);
    shell::boot(&mut console, &settings);

    loop {
        // poll_input already waits out the configured interval when idle.
        if let Some(event) = console.poll_input()
            && !shell::dispatch(&mut console, &settings, event)
        {
            break;
        }
    }

    // Restore the terminal before the audio task joins on drop.
    drop(console);
    Ok(())
}
