use clap::Parser;

use ae_kiosk::cli::commands::Cli;
use ae_kiosk::cli::handlers;
use ae_kiosk::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = launch_tui(&cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn launch_tui(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let root = handlers::resolve_root(cli.root.as_deref())?;
    let config = config_io::read_config(&root)?;
    let state_dir = handlers::resolve_state_dir(&root, &config, cli.state_dir.as_deref());
    // logs go to a file so nothing prints over the alternate screen
    let _ = logging::init(&state_dir);
    ae_kiosk::tui::run(&root, Some(state_dir.as_path()))
}
