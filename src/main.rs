use clap::Parser;
use colored::Colorize;

use aka::cli::{Cli, Commands};
use aka::config::{get_config, init_config};
use aka::errors::AkaError;
use aka::runtime::modes;
use aka::system::logging::init_logging;

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match e.root_cause().downcast_ref::<AkaError>() {
            Some(aka_err) => eprintln!("{}\n  {}", aka_err.format_colored(), e),
            None => eprintln!("{} {:#}", "[ERROR]".red().bold(), e),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Serve);

    // 生成配置不需要加载现有配置
    if let Commands::Config { output } = &command {
        return modes::run_generate_config(output.as_deref());
    }

    init_config(cli.config.as_deref());
    let config = get_config();
    let _guard = init_logging(&config.logging)?;

    match command {
        Commands::Serve => modes::run_server(&config).await,
        Commands::Repair => modes::run_repair(&config).await,
        Commands::Config { .. } => Ok(()),
    }
}
