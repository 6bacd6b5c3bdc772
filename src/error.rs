//! Provides [SlothError], the error type for the narrow set of failures
//! that cross the library boundary. Runtime faults stay first-class
//! [crate::value::Value::Fault] values — they never become a [SlothError].
use thiserror::Error;

/// Failures a caller of the library surface can encounter.
#[derive(Debug, Error)]
pub enum SlothError {
    /// Parsing produced one or more diagnostics; the caller should not
    /// evaluate the resulting [crate::ast::Program].
    #[error("parse error(s): {0:?}")]
    Parse(Vec<String>),

    /// Reading source from disk failed (only relevant to the demo
    /// script-runner binary, not the core library).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
