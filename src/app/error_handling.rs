//! Error handling utilities

use crate::error::{describe_error_code, DistError};
use tracing::error;

/// Report a fatal error and exit with the matching status code
///
/// - For `DistError`: prints the stage-naming user message, and the coded
///   developer message with its source chain in verbose mode
/// - For other errors: prints the message and, in verbose mode, the chain
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);

    let exit_code = if let Some(dist_err) = error.downcast_ref::<DistError>() {
        eprintln!("Error: {}", dist_err.user_message());

        if verbose >= 1 {
            eprintln!("\nDetails:\n{}", dist_err.developer_message());
            eprintln!(
                "\nE{:04}: {}",
                dist_err.code(),
                describe_error_code(dist_err.code())
            );
        }

        dist_err.exit_code()
    } else {
        eprintln!("Error: {error}");

        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }

        1
    };

    std::process::exit(exit_code)
}
