use winprobe::{build_cli, init_logging, run_command};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = build_cli();
    let matches = app.get_matches();

    // Extract quiet flag before initializing logging
    let quiet = matches.get_flag("quiet");
    init_logging(quiet);

    run_command(&matches)?;

    Ok(())
}
