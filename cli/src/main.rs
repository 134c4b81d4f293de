use clap::Parser;
use colored::Colorize;
use plasma_cli::{
    cli::CliArgs,
    commands,
    logs::LogColor,
};

fn main() {
    if let Err(e) = commands::run(CliArgs::parse()) {
        eprintln!("{} {e:#}", "error:".color(LogColor::Error));
        std::process::exit(1);
    }
}
