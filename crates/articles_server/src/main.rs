//! `articlesd`: REST service for articles.

use articles_server::{
    command, init_server_logging, serve, CliOverrides, ServerConfig, ServerResult,
};
use std::process::ExitCode;

fn run() -> ServerResult<()> {
    let matches = command().get_matches();
    let config = ServerConfig::resolve(CliOverrides::from_matches(&matches))?;
    init_server_logging(&config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(&config))
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("articlesd: {err}");
            ExitCode::FAILURE
        }
    }
}
