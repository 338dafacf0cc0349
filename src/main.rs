use api::api::start_server;

#[macro_use]
extern crate diesel;

use clap::Parser;

mod api;
mod config;
mod models;
mod schema;

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = "HTTP CRUD service for todos")]
struct ServerArgs {
    /// Address to bind the HTTP server to, e.g. localhost:8080
    #[clap(short = 'b', long = "bind")]
    bind: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();

    let bind = args.bind.unwrap_or_else(|| config::API_URL.clone());

    start_server(bind)?;

    Ok(())
}
