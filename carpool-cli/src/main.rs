//! Entry point for the `carpool` command-line interface.
#![forbid(unsafe_code)]

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn main() {
    if let Err(err) = carpool_cli::run() {
        eprintln!("carpool: {err}");
        std::process::exit(1);
    }
}
