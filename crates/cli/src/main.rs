//! surrogate-demo: round-trips a few values through their serialization
//! proxies and a scratch file, printing each step.
//!
//! Takes no arguments. Any failure ends the run.

mod demo;

use demo::Demo;

fn main() -> anyhow::Result<()> {
    // Trace lines go to stdout so they interleave with the progress lines
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_target(false)
        .without_time()
        .init();

    Demo::new()?.run()
}
