use clap::Parser;
use tracing::info;

use textcopy::cli::{Cli, Commands};
use textcopy::config::StaticConfig;
use textcopy::runtime::modes::run_server;
use textcopy::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(Commands::GenerateConfig { output }) = &cli.command {
        return generate_config(output.as_deref());
    }

    let config = match StaticConfig::load(cli.config.as_deref()).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(&config.logging)?;

    info!("textcopy v{} starting", env!("CARGO_PKG_VERSION"));
    run_server(config).await
}

fn generate_config(output: Option<&str>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            if let Err(e) = StaticConfig::default().save_to_file(path) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            println!("Sample configuration written to {}", path);
        }
        None => println!("{}", StaticConfig::generate_sample_config()),
    }
    Ok(())
}
