use anyhow::Result;
use benchmark::benchmark;
use clap::Parser;
use command_parser::*;

mod benchmark;
mod command_parser;

fn main() -> Result<()> {
    let app = App::parse();

    benchmark(&app.global_opts)
}
