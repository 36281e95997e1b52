use anyhow::Result;
use clap::Parser;
use fontpair::cli::{self, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Unified logging: --log-level, then RUST_LOG, then the config's level (applied below)
    fontpair::debug::init_log_bridge(cli.log_level);
    log::info!("Starting fontpair");

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("fontpair: error: {e:#}");
            std::process::exit(1);
        }
    };
    fontpair::debug::apply_config_level(cli.log_level, config.log_level);

    let command = cli.command.clone().unwrap_or(Commands::Ui);
    let storage = Box::new(cli.open_storage());
    let mut stdout = std::io::stdout().lock();

    if let Err(e) = cli::execute(&command, &config, storage, &mut stdout) {
        log::error!("Command {:?} failed: {e:#}", command);
        eprintln!("fontpair: error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
