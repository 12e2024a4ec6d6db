//! Concurrency tests for caller registration and debug file versioning
//!
//! These tests verify:
//! - Concurrent first calls for one identity create exactly one sink
//! - Many worker threads each get exactly one sink and no lost messages
//! - Concurrent file-producing debug calls never share a file

use plugin_logger::prelude::*;
use plugin_logger::CallerRegistry;
use std::collections::HashSet;
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

/// Racing first calls for one previously unseen identity
#[test]
fn test_concurrent_first_calls_create_one_sink() {
    const RACERS: usize = 16;

    for _ in 0..50 {
        let registry = Arc::new(CallerRegistry::new());
        let host: Arc<dyn HostSink> = Arc::new(Logger::new("host"));
        let target = thread::Builder::new()
            .name("contended".to_string())
            .spawn(CallerIdentity::current)
            .unwrap()
            .join()
            .unwrap();
        let barrier = Arc::new(Barrier::new(RACERS));

        let handles: Vec<_> = (0..RACERS)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let host = Arc::clone(&host);
                let target = target.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    registry.sink_for(&target, &host)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let creators = results.iter().filter(|(_, created)| *created).count();
        assert_eq!(creators, 1, "exactly one racer should create the sink");
        assert!(results.iter().all(|(sink, _)| Arc::ptr_eq(sink, &results[0].0)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.created_count(), 1);
    }
}

/// Many distinct workers logging at once through the router
#[test]
fn test_many_workers_each_registered_once() {
    const WORKERS: usize = 32;
    const MESSAGES: usize = 50;

    let memory = MemoryAppender::new();
    let records = memory.handle();
    let host = Arc::new(Logger::builder().appender(memory).build());
    let logger = Arc::new(PluginLogger::init(host));
    let barrier = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|w| {
            let logger = Arc::clone(&logger);
            let barrier = Arc::clone(&barrier);
            thread::Builder::new()
                .name(format!("worker-{}", w))
                .spawn(move || {
                    barrier.wait();
                    for i in 0..MESSAGES {
                        logger.info(format!("message {}", i), &[]);
                    }
                })
                .unwrap()
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    assert_eq!(logger.registry().len(), WORKERS);
    assert_eq!(logger.registry().created_count(), WORKERS as u64);
    assert_eq!(logger.metrics().callers_registered(), WORKERS as u64);
    assert_eq!(records.len(), WORKERS * MESSAGES);

    for w in 0..WORKERS {
        let prefix = format!("[worker-{}] ", w);
        let own: Vec<String> = records
            .messages()
            .into_iter()
            .filter(|m| m.starts_with(&prefix))
            .collect();
        assert_eq!(own.len(), MESSAGES, "worker-{} lost messages", w);
        // Per-thread order is preserved and the label appears once
        for (i, message) in own.iter().enumerate() {
            assert_eq!(message, &format!("{}message {}", prefix, i));
        }
    }
}

/// Concurrent file-producing debug calls claim distinct versions
#[test]
fn test_concurrent_debug_files_are_distinct() {
    const WRITERS: usize = 12;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let host = Arc::new(Logger::new("host"));
    let logger = Arc::new(PluginLogger::init(host));
    let plugin = Arc::new(
        PluginDescriptor::new("ImageOnMap", dir.path()).with_debug_level(DebugLevel::DeveloperLog),
    );
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|w| {
            let logger = Arc::clone(&logger);
            let plugin = Arc::clone(&plugin);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                logger.debug_to_file(
                    false,
                    &*plugin,
                    DebugLevel::UserLog,
                    &format!("writer {}", w),
                    &[],
                )
            })
        })
        .collect();

    let paths: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap().expect("every writer gets a file"))
        .collect();

    let unique: HashSet<_> = paths.iter().collect();
    assert_eq!(unique.len(), WRITERS);

    let contents: HashSet<String> = paths.iter().map(|p| fs::read_to_string(p).unwrap()).collect();
    assert_eq!(contents.len(), WRITERS);
    assert_eq!(logger.metrics().file_failures(), 0);
}
