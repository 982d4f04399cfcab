use clap::Parser;

use snippetkit::cli::{cmd_generate, init_logger, GenerateArgs};

fn main() {
    init_logger();

    if let Err(e) = cmd_generate(GenerateArgs::parse()) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
