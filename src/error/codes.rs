/// Error code registry for dist-cities
///
/// Error codes are organized by the stage that raised them:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Load errors (reading and parsing the point file)
/// - 3000-3999: Enumeration errors
/// - 4000-4999: Distribution errors
/// - 5000-5999: Compute errors
/// - 6000-6999: Aggregation errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1003;

    // Load errors (2000-2999)
    pub const LOAD_IO_ERROR: u16 = 2001;
    pub const LOAD_MALFORMED_RECORD: u16 = 2002;
    pub const LOAD_PROTOCOL: u16 = 2003;

    // Enumeration errors (3000-3999)
    pub const ENUMERATE_INSUFFICIENT_INPUT: u16 = 3001;
    pub const ENUMERATE_PROTOCOL: u16 = 3002;

    // Distribution errors (4000-4999)
    pub const DISTRIBUTE_PROTOCOL: u16 = 4001;

    // Compute errors (5000-5999)
    pub const COMPUTE_WORKER_FAILED: u16 = 5001;
    pub const COMPUTE_TIMEOUT: u16 = 5002;
    pub const COMPUTE_PROTOCOL: u16 = 5003;

    // Aggregation errors (6000-6999)
    pub const AGGREGATE_LENGTH_MISMATCH: u16 = 6001;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::CONFIG_GENERIC => "Generic configuration error",
        ErrorCode::CONFIG_NOT_FOUND => "Configuration file not found",
        ErrorCode::CONFIG_INVALID_TOML => "Configuration file is not valid TOML",
        ErrorCode::CONFIG_INVALID_VALUE => "Configuration value out of range",

        ErrorCode::LOAD_IO_ERROR => "Point file could not be read",
        ErrorCode::LOAD_MALFORMED_RECORD => "Point record could not be parsed",
        ErrorCode::LOAD_PROTOCOL => "Point store is inconsistent",

        ErrorCode::ENUMERATE_INSUFFICIENT_INPUT => "Fewer than two points supplied",
        ErrorCode::ENUMERATE_PROTOCOL => "Pair refers to a point outside the store",

        ErrorCode::DISTRIBUTE_PROTOCOL => "Chunk could not be delivered to a worker",

        ErrorCode::COMPUTE_WORKER_FAILED => "Worker failed before returning its chunk",
        ErrorCode::COMPUTE_TIMEOUT => "Distributed phase exceeded its time limit",
        ErrorCode::COMPUTE_PROTOCOL => "Coordinator left the compute phase out of order",

        ErrorCode::AGGREGATE_LENGTH_MISMATCH => "Aggregated results do not cover every pair",

        _ => "Unknown error code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_have_descriptions() {
        for code in [
            ErrorCode::CONFIG_NOT_FOUND,
            ErrorCode::LOAD_MALFORMED_RECORD,
            ErrorCode::ENUMERATE_INSUFFICIENT_INPUT,
            ErrorCode::COMPUTE_WORKER_FAILED,
            ErrorCode::AGGREGATE_LENGTH_MISMATCH,
        ] {
            assert_ne!(describe_error_code(code), "Unknown error code");
        }
    }

    #[test]
    fn test_codes_fall_in_stage_ranges() {
        let ranges = [
            (ErrorCode::LOAD_PROTOCOL, 2000),
            (ErrorCode::ENUMERATE_PROTOCOL, 3000),
            (ErrorCode::DISTRIBUTE_PROTOCOL, 4000),
            (ErrorCode::COMPUTE_PROTOCOL, 5000),
            (ErrorCode::AGGREGATE_LENGTH_MISMATCH, 6000),
        ];
        for (code, base) in ranges {
            assert!((base..base + 1000).contains(&code), "{} not in {}xxx", code, base / 1000);
            assert_ne!(describe_error_code(code), "Unknown error code");
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(describe_error_code(9999), "Unknown error code");
    }
}
