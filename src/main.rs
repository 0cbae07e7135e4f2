use clap::Parser;
use log::debug;
use std::process;
use threadmark::cli::{self, Config, Error};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = Config::parse();
    env_logger::Builder::new()
        .filter_level(config.verbosity().log_level_filter())
        .init();

    if let Err(err) = cli::run(config).await {
        if let Error::Fetch(fetch_err) = &err {
            if let Some(body) = fetch_err.response_body() {
                debug!("response body: {body}");
            }
        }
        eprintln!("threadmark: {err}");
        process::exit(1);
    }
}
