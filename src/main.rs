use clap::Parser;
use mirror_kit::{run, MirrorKitCli};
use std::process::exit;

fn main() {
    let args = MirrorKitCli::parse();
    env_logger::builder()
        .filter_level(args.log_level())
        .format_target(false)
        .format_timestamp(None)
        .parse_default_env()
        .init();
    log::debug!(concat!(
        env!("CARGO_PKG_NAME"),
        " ",
        env!("CARGO_PKG_VERSION")
    ));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(args, &mut out) {
        Ok(_) => {
            exit(0);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit(e.exit_code());
        }
    };
}
