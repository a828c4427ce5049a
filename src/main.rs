use clap::Parser;
use skuboard::cli::{normalize_input, read_input, Cli, CliCommand};
use skuboard_core::config::Config;
use skuboard_tui::Mode;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let path = std::env::temp_dir().join("skuboard-debug.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(path = %path.display(), "skuboard debug log started");
    }

    let mode = match cli.command.unwrap_or(CliCommand::Dashboard) {
        CliCommand::Normalize { file, envelope } => {
            let input = read_input(file.as_deref())?;
            let out = normalize_input(&input, envelope);
            match out.strategy {
                Some(strategy) => eprintln!("{} row(s) via {strategy}", out.rows.len()),
                None => eprintln!("no rows recovered"),
            }
            println!("{}", serde_json::to_string_pretty(&out.rows)?);
            return Ok(());
        }
        CliCommand::Dashboard => Mode::Dashboard,
        CliCommand::View => Mode::View,
    };

    let config = Config::load(cli.config.as_deref())?;
    let runtime = tokio::runtime::Runtime::new()?;
    skuboard_tui::run(config, mode, runtime.handle().clone())
}
