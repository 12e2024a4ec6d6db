//! Property-based tests for plugin_logger using proptest

use chrono::NaiveDate;
use plugin_logger::prelude::*;
use plugin_logger::{file_name, versioned_file_name, CallerSink};
use proptest::prelude::*;
use std::sync::Arc;

fn any_debug_level() -> impl Strategy<Value = DebugLevel> {
    prop_oneof![
        Just(DebugLevel::None),
        Just(DebugLevel::UserLog),
        Just(DebugLevel::SystemLog),
        Just(DebugLevel::DeveloperLog),
    ]
}

/// Reference gate written as the table rows
fn table(requested: DebugLevel, configured: DebugLevel) -> bool {
    let row: &[DebugLevel] = match configured {
        DebugLevel::None => &[],
        DebugLevel::UserLog => &[DebugLevel::UserLog],
        DebugLevel::SystemLog => &[DebugLevel::SystemLog],
        DebugLevel::DeveloperLog => &[
            DebugLevel::UserLog,
            DebugLevel::SystemLog,
            DebugLevel::DeveloperLog,
        ],
    };
    row.contains(&requested)
}

proptest! {
    /// The gate agrees with the table for every pair
    #[test]
    fn test_gate_matches_table(requested in any_debug_level(), configured in any_debug_level()) {
        prop_assert_eq!(should_emit(requested, configured), table(requested, configured));
    }

    /// Only developer verbosity covers more than one level
    #[test]
    fn test_only_developer_is_broad(configured in any_debug_level()) {
        let covered = DebugLevel::ALL.iter().filter(|r| configured.covers(**r)).count();
        let expected = match configured {
            DebugLevel::None => 0,
            DebugLevel::DeveloperLog => 3,
            _ => 1,
        };
        prop_assert_eq!(covered, expected);
    }

    /// Debug level names parse back case-insensitively
    #[test]
    fn test_debug_level_name_roundtrip(level in any_debug_level(), lower in any::<bool>()) {
        let name = if lower { level.to_str().to_lowercase() } else { level.to_string() };
        prop_assert_eq!(name.parse::<DebugLevel>().unwrap(), level);
    }

    /// The chosen version is one past the run of taken versions
    #[test]
    fn test_version_is_first_gap(
        level in any_debug_level(),
        taken in 0u32..20,
        day in 1u32..=28,
    ) {
        let date = NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
        let existing: Vec<String> = (1..=taken).map(|v| file_name(level, date, v)).collect();

        let name = versioned_file_name(level, date, |n| existing.iter().any(|e| e == n));

        prop_assert_eq!(name, file_name(level, date, taken + 1));
    }

    /// A caller sink prefixes exactly once, however many times it is used
    #[test]
    fn test_caller_prefix_once(messages in proptest::collection::vec("[^\\[]{0,24}", 1..8)) {
        let memory = MemoryAppender::new();
        let records = memory.handle();
        let host: Arc<dyn HostSink> = Arc::new(Logger::builder().appender(memory).build());
        let caller = CallerIdentity::new(std::thread::current().id(), Some("pool-1".to_string()));
        let sink = CallerSink::new(&caller, host);

        for message in &messages {
            sink.log(LogEntry::new(Severity::Info, message.clone()));
        }

        let expected: Vec<String> = messages.iter().map(|m| format!("[pool-1] {}", m)).collect();
        prop_assert_eq!(records.messages(), expected);
    }
}
