use std::{env, process};

use image_wizard::{cli, init};

fn main() {
    init();

    if let Some(arg) = env::args().nth(1) {
        match arg.as_str() {
            "-h" | "--help" | "help" => {
                print_usage();
                return;
            }
            "-V" | "--version" => {
                println!("image_wizard_cli {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            other => {
                eprintln!("Unknown argument `{other}`");
                print_usage();
                process::exit(2);
            }
        }
    }

    if let Err(err) = cli::run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "Usage: image_wizard_cli [--help | --version]\n\n\
         Starts the interactive Create a new image wizard.\n\
         Configuration and saved requests live under $IMAGE_WIZARD_HOME \
         (default ~/.image_wizard)."
    );
}
