use std::path::PathBuf;
use std::process;

use gnat_gateway::ConnectorFactory;
use gnat_runner::{
    ConsoleDashboard, ConsolePrompter, CsvStorage, DisplayPublisher, Result, SessionConfig,
    Supervisor, TradingLoop,
};

fn print_help() {
    eprintln!(
        r#"gnat - console trading supervisor

USAGE:
    gnat [CONFIG]
    gnat [OPTIONS]

OPTIONS:
    --config <PATH>     Load session configuration from a YAML file
    --help              Print this help message

Without a configuration file the session is set up through prompts.

CONFIG KEYS:
    assets                  Comma separated tickers, '@' prefix for crypto (e.g. AAPL,@DOGE)
    streamer                dummy | yahoo | polygon | alpaca
    broker                  paper | alpaca | same as streamer
    secret_path             YAML file with API keys (optional)
    basic_account           y/n (optional, asked when needed)
    alpaca_paper_trader     y/n (optional, asked when needed)
    interval                1MIN | 5MIN | 15MIN | 30MIN | 1HR | 1DAY (default 1MIN)
    storage_dir             Bar history directory (default gnat_storage)

ENVIRONMENT VARIABLES:
    RUST_LOG                Log level filter (default: info)

COMMANDS (once running):
    buy <TICKER> <AMOUNT>
    sell <TICKER> <AMOUNT>
    q | quit
"#
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return;
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    process::exit(1);
                }
                config_path = Some(PathBuf::from(&args[i]));
            }
            arg if !arg.starts_with('-') && config_path.is_none() => {
                config_path = Some(PathBuf::from(arg));
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if let Err(e) = run(config_path) {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn run(config_path: Option<PathBuf>) -> Result<()> {
    let mut prompter = ConsolePrompter::stdio();

    let session = match config_path {
        Some(path) => SessionConfig::load(&path)?,
        None => SessionConfig::prompt(&mut prompter)?,
    };
    let connectors = ConnectorFactory::new().resolve(session.connectors, &mut prompter)?;

    let mut supervisor = Supervisor::new();
    let trading_loop = TradingLoop::new(
        &connectors,
        session.symbols,
        supervisor.queue(),
        supervisor.board(),
    )
    .with_storage(Box::new(CsvStorage::new(session.storage_dir)))
    .with_interval(session.interval.as_duration());
    let display = DisplayPublisher::new(supervisor.board(), ConsoleDashboard::new());

    supervisor.start(trading_loop, display)?;
    supervisor.listen(&mut prompter)?;

    // Workers may be mid-cycle; the process exits without draining them
    supervisor.detach();
    Ok(())
}
