//! Binary entrypoint for fontord-cli (made by FontLab https://www.fontlab.com/)

fn main() {
    env_logger::init();

    if let Err(err) = fontord_cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
