use clap::Parser;

use snippetkit::cli::{cmd_install, init_logger, InstallArgs};

fn main() {
    init_logger();

    if let Err(e) = cmd_install(InstallArgs::parse()) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
