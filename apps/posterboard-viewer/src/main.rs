use clap::Parser;

use posterboard_viewer_lib::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    posterboard_viewer_lib::run(Cli::parse()).await
}
