use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod capacity;
mod collection;
mod config;
mod error;
mod events;
mod linked_list;
mod logging;
mod notice;
mod queue;
mod removal;
mod stack;
mod themes;
mod token;
mod ui;
mod version;
mod visualizer;

use app::{ActiveView, App};
use config::Config;
use themes::ThemeName;

fn theme_help_text() -> String {
    format!("Color theme to use (available: {})", ThemeName::available())
}

fn parse_theme(s: &str) -> Result<String, String> {
    s.parse::<ThemeName>().map(|_| s.to_string())
}

#[derive(Parser)]
#[command(name = "dsviz")]
#[command(about = "A terminal UI that animates bounded stacks, bounded queues and singly linked lists")]
#[command(version = version::get_version())]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON configuration file; flags given here take precedence over it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting size of the stack and the queue (clamped to 1..=200)
    #[arg(short, long, allow_negative_numbers = true)]
    capacity: Option<i64>,

    /// Delay in milliseconds before a pop/dequeue is committed
    #[arg(long)]
    commit_delay: Option<u64>,

    /// How long notices stay on screen, in milliseconds
    #[arg(long)]
    notice_duration: Option<u64>,

    /// Update interval in milliseconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    update_interval: Option<u64>,

    /// Data structure shown on start
    #[arg(short, long, value_enum)]
    view: Option<ActiveView>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(short, long, value_parser = parse_theme, help = theme_help_text())]
    theme: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show detailed version information
    VersionInfo,
    /// Print the linked list built from the given text and exit
    Tokenize {
        /// Items separated by whitespace
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

impl Cli {
    /// Defaults, then the config file, then flags.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(capacity) = self.capacity {
            config.default_capacity = capacity;
        }
        if let Some(delay) = self.commit_delay {
            config.commit_delay_ms = delay;
        }
        if let Some(duration) = self.notice_duration {
            config.notice_duration_ms = duration;
        }
        if let Some(interval) = self.update_interval {
            config.tick_rate_ms = interval;
        }
        if let Some(view) = self.view {
            config.initial_view = view;
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }

        config.validate()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle subcommands
    if let Some(command) = &cli.command {
        match command {
            Commands::VersionInfo => {
                version::print_build_info();
                return Ok(());
            }
            Commands::Tokenize { text } => {
                let mut list = linked_list::LinkedListView::new();
                list.generate_from(&text.join(" "));
                println!("{}", list.chain());
                return Ok(());
            }
        }
    }

    logging::init(cli.log_file.as_deref(), cli.debug)?;

    let config = cli.resolve_config()?;
    tracing::info!(?config, "configuration resolved");

    let mut app = App::new(&config);

    // Run the TUI application
    app.run().await?;

    Ok(())
}
