//! MiRRA Showroom Entry Point
//!
//! Launches the terminal showroom for MiRRA - style in sight.
//!
//! # Usage
//!
//! ```bash
//! # Start with defaults (or ~/.config/mirra/showroom.toml)
//! mirra
//!
//! # Custom config file
//! mirra --config ./showroom.toml
//!
//! # Hold the carousel still, answer faster
//! mirra --no-autoplay --reply-delay-ms 250
//!
//! # Logs go to stderr
//! RUST_LOG=debug mirra 2> mirra.log
//! ```

use std::io;
use std::panic;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mirra_core::{load_config_from_path, ConfigOverrides, Showroom};
use mirra_tui::App;

/// MiRRA - terminal fashion showroom
#[derive(Parser, Debug)]
#[command(name = "mirra")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "MIRRA_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep the shop carousel still
    #[arg(long)]
    no_autoplay: bool,

    /// Carousel autoplay interval in milliseconds
    #[arg(long, value_name = "MS")]
    carousel_interval_ms: Option<u64>,

    /// Delay before the stylist replies, in milliseconds
    #[arg(long, value_name = "MS")]
    reply_delay_ms: Option<u64>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if self.no_autoplay {
            overrides = overrides.with_autoplay(false);
        }
        if let Some(ms) = self.carousel_interval_ms {
            overrides = overrides.with_carousel_interval_ms(ms);
        }
        if let Some(ms) = self.reply_delay_ms {
            overrides = overrides.with_reply_delay_ms(ms);
        }
        overrides
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Set up logging (stderr, so the alternate screen stays clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = load_config_from_path(args.config.clone()).context("Failed to load config")?;
    args.overrides()
        .apply(&mut config)
        .context("Invalid command line option")?;
    tracing::info!(source = %config.source(), "Configuration loaded");

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: mirra requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or ssh ran without -t.");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    let size = terminal.size()?;

    // Run the app
    let mut showroom = Showroom::new(config);
    showroom.mount();
    let mut app = App::new(showroom, (size.width, size.height));
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio_test::assert_ok;

    #[test]
    fn test_flags_become_overrides() {
        let args = Args::parse_from([
            "mirra",
            "--no-autoplay",
            "--carousel-interval-ms",
            "1500",
            "--reply-delay-ms",
            "200",
        ]);
        let mut config = mirra_core::ShowroomConfig::default();
        assert_ok!(args.overrides().apply(&mut config));

        assert!(!config.autoplay);
        assert_eq!(config.carousel_interval, Duration::from_millis(1500));
        assert_eq!(config.reply_delay, Duration::from_millis(200));
        assert_eq!(config.source(), mirra_core::ConfigSource::Cli);
    }

    #[test]
    fn test_no_flags_no_overrides() {
        let args = Args::parse_from(["mirra"]);
        assert!(args.overrides().is_empty());
    }
}
