//! rAttendance main entrypoint.

use rattendance::{prepare, run};
use tracing_subscriber::EnvFilter;

fn main() {
    let (cli, cfg) = match prepare() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_env("RATTENDANCE_LOG")
        .or_else(|_| EnvFilter::try_new(&cfg.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    if let Err(e) = runtime.block_on(run(cli, cfg)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
