//! Gated debug output and versioned debug files
//!
//! Run with: cargo run --example debug_files

use plugin_logger::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Plugin Logger - Debug Files Example ===\n");

    let data_dir = std::env::temp_dir().join("plugin_logger_demo");
    let plugin = PluginDescriptor::from_config(
        PluginConfig::new("ImageOnMap", &data_dir).with_debug_level(DebugLevel::UserLog),
    );

    let host = Arc::new(
        Logger::builder()
            .name("ImageOnMap")
            .appender(ConsoleAppender::new())
            .build(),
    );
    let logger = PluginLogger::init(host);

    println!("1. USER_LOG verbosity lets user messages through, not system ones:");
    logger.debug(&plugin, DebugLevel::UserLog, "Player {0} placed a map", &[&"Amaury"]);
    logger.debug(&plugin, DebugLevel::SystemLog, "Chunk cache flushed", &[]);

    println!("\n2. Developer verbosity covers everything, one file per call:");
    plugin.set_debug_level(DebugLevel::DeveloperLog);
    for step in ["load", "render", "save"] {
        if let Some(path) =
            logger.debug_to_file(false, &plugin, DebugLevel::SystemLog, step, &[])
        {
            println!("   wrote {}", path.display());
        }
    }

    println!("\n3. Sequences are gated message by message:");
    logger.debug_all(&plugin, DebugLevel::UserLog, &["first", "second", "third"], &[]);

    println!(
        "\nDebug files written: {}, failures: {}",
        logger.metrics().files_written(),
        logger.metrics().file_failures()
    );

    Ok(())
}
