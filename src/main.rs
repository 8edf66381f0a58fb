use anyhow::Result;
use clap::Parser;

use harmony_chat::cli::commands::{chat, config, configure, extract};
use harmony_chat::cli::{Args, Command};
use harmony_chat::config::ResolveOptions;
use harmony_chat::logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    logging::init(args.verbose);

    let options = ResolveOptions::from(args.backend);

    match args.command {
        None | Some(Command::Chat) => chat::run_chat(&options).await?,
        Some(Command::Extract { file }) => extract::run_extract(file.as_deref())?,
        Some(Command::Config) => config::print_config(&options)?,
        Some(Command::Configure) => configure::run_configure()?,
    }

    Ok(())
}
