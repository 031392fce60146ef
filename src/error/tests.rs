use super::*;

#[test]
fn test_error_stage_and_exit_codes() {
    let err = DistError::config("workers must be at least 1");
    assert_eq!(err.stage(), Stage::Config);
    assert_eq!(err.exit_code(), 2);
    assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);

    let err = DistError::MalformedRecord {
        line: 3,
        reason: "latitude 'abc' is not a number".to_string(),
    };
    assert_eq!(err.stage(), Stage::Load);
    assert_eq!(err.exit_code(), 3);
    assert_eq!(err.code(), ErrorCode::LOAD_MALFORMED_RECORD);

    let err = DistError::InsufficientInput { points: 1 };
    assert_eq!(err.stage(), Stage::Enumerate);
    assert_eq!(err.exit_code(), 4);

    let err = DistError::worker(2, "task panicked");
    assert_eq!(err.stage(), Stage::Compute);
    assert_eq!(err.exit_code(), 6);
    assert_eq!(err.code(), ErrorCode::COMPUTE_WORKER_FAILED);

    let err = DistError::protocol(Stage::Aggregate, "expected 10 results, got 9");
    assert_eq!(err.stage(), Stage::Aggregate);
    assert_eq!(err.exit_code(), 7);
    assert_eq!(err.code(), ErrorCode::AGGREGATE_LENGTH_MISMATCH);
}

#[test]
fn test_user_message_names_stage() {
    let err = DistError::InsufficientInput { points: 1 };
    let message = err.user_message();
    assert!(message.starts_with("Stage 'enumerate' failed"));
    assert!(message.contains("no pairs to compute"));

    let err = DistError::worker(0, "reply channel closed");
    assert!(err.user_message().contains("worker 0 did not return its chunk"));
}

#[test]
fn test_config_error_source_drives_code() {
    let toml_err = toml::from_str::<toml::Table>("workers = ").unwrap_err();
    let err = DistError::config("invalid config file").with_source(toml_err);
    assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_TOML);

    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err = DistError::config("cannot open config").with_source(io_err);
    assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
}

#[test]
fn test_developer_message_includes_chain() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err = DistError::Io {
        path: PathBuf::from("cities.txt"),
        source: io_err,
    };
    let message = err.developer_message();
    assert!(message.starts_with("[E2001] Failed to read cities.txt"));
    assert!(message.contains("caused by: no such file"));
}

#[test]
fn test_with_source_ignored_for_non_config() {
    let err = DistError::worker(1, "boom").with_source("unrelated");
    assert!(std::error::Error::source(&err).is_none());
}

#[test]
fn test_protocol_codes_follow_stage() {
    for stage in [
        Stage::Config,
        Stage::Load,
        Stage::Enumerate,
        Stage::Distribute,
        Stage::Compute,
        Stage::Aggregate,
    ] {
        let err = DistError::protocol(stage, "out of order");
        assert_eq!(err.stage(), stage);
        assert_eq!(err.code() / 1000, err.exit_code() as u16 - 1, "stage {}", stage);
    }
}

#[test]
fn test_sub_second_timeout_is_reported() {
    let err = DistError::Timeout {
        limit: Duration::from_millis(50),
    };
    assert_eq!(err.to_string(), "Distributed phase timed out after 50ms");
    assert!(err.user_message().contains("within 50ms"));
    assert_eq!(err.code(), ErrorCode::COMPUTE_TIMEOUT);
}
