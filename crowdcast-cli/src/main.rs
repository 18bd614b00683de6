//! Entry point for the `crowdcast` command-line interface.
#![forbid(unsafe_code)]

use crowdcast_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "the binary reports failures on stderr"
)]
fn main() {
    match crowdcast_cli::run() {
        Ok(()) => {}
        // Clap renders help, version and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("crowdcast: {err}");
            std::process::exit(1);
        }
    }
}
