//! Basic router usage
//!
//! Demonstrates main-thread and worker-thread logging through a console host sink.
//!
//! Run with: cargo run --example basic_usage

use plugin_logger::prelude::*;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== Plugin Logger - Basic Usage Example ===\n");

    let host = Arc::new(
        Logger::builder()
            .name("ImageOnMap")
            .min_level(Severity::Info)
            .appender(ConsoleAppender::new())
            .build(),
    );
    let logger = Arc::new(PluginLogger::init(host.clone()));

    println!("1. Main thread logs without a prefix:");
    logger.info("Plugin enabled, {0} maps loaded", &[&12]);
    logger.warning("Config file uses a deprecated key", &[]);

    println!("\n2. Worker threads are labelled with their name:");
    let workers: Vec<_> = (1..=2)
        .map(|n| {
            let logger = Arc::clone(&logger);
            thread::Builder::new()
                .name(format!("Renderer-{}", n))
                .spawn(move || logger.info("Rendered map #{0}", &[&n]))
        })
        .collect::<std::io::Result<_>>()?;
    for worker in workers {
        let _ = worker.join();
    }

    println!("\n3. Errors with a cause print the cause separately:");
    let err = std::fs::read("/no/such/poster.png").unwrap_err();
    logger.error_cause_with_args("Could not import {0}", &err, &[&"poster.png"]);

    println!("\n4. Raising the host threshold hides info messages:");
    host.set_min_level(Severity::Warning);
    logger.info("Hidden", &[]);
    logger.warning("Visible", &[]);

    host.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
