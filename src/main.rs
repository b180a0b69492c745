mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    rucontract::logger::init_logger();

    let cli = Cli::parse();
    match cli.command {
        Commands::Queries { name } => cli::print_queries(name.as_deref())?,
        Commands::Check { suite, results } => cli::run_check(suite, results).await?,
    }
    Ok(())
}
