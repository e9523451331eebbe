use clap::Parser;

use flat_viewing::cli::{
    Cli, CommandOutcome, effective_environment, execute_command, init_logger_from_settings,
    load_and_merge_config,
};
use flat_viewing::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    init_logger_from_settings(&settings)?;

    match execute_command(&cli, settings.clone())? {
        CommandOutcome::Exit => Ok(()),
        CommandOutcome::StartServer => {
            Server::new(settings, effective_environment(&cli)).run().await
        }
    }
}
