//! Error types for asset synthesis.
//!
//! Provides the crate-wide error enum with contextual error chaining and
//! filesystem errors that carry the offending path.
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **bail! macro**: Early return with formatted error messages
//!
//! Every failure is fatal for the current build: the assembler never emits a
//! partial artifact set for a format whose synthesis failed, and nothing is
//! retried inside the crate.

use std::{fmt::Display, io, path::PathBuf};
use thiserror::Error as DeriveError;

/// Errors returned by the asset synthesizer.
///
/// Each variant carries enough context (offending path or macro name) to be
/// directly actionable by the caller.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "reading template file")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// A raster icon filename fails the size-encoding contract.
    ///
    /// Raster icons must be named `<name>.<size>.png` or
    /// `<name>.<size>x<size>.png` with a size from the allowed set.
    #[error(
        "invalid icon filename {path}: raster icons must encode their size as \
         '<name>.<size>.png' or '<name>.<size>x<size>.png' where <size> is one \
         of 16, 24, 32, 48, 64, 96, 128, 256"
    )]
    InvalidIconName {
        /// The offending icon path.
        path: PathBuf,
    },

    /// A template references a macro name not present in the symbol table.
    #[error("template references unknown macro ${{{name}}}")]
    UnresolvedMacro {
        /// The unrecognized macro name.
        name: String,
    },

    /// Macro expansion revisited a macro currently being expanded.
    #[error("macro ${{{name}}} expands through itself (reference cycle)")]
    CyclicMacro {
        /// The macro at which the cycle was detected.
        name: String,
    },

    /// A configured template file exists but is blank after trimming.
    #[error("template file {path} is empty")]
    EmptyTemplate {
        /// Path of the blank template.
        path: PathBuf,
    },

    /// A path the configuration asserts must exist is absent.
    ///
    /// Only raised when strict existence checking is enabled.
    #[error("required file not found: {path}")]
    MissingRequiredFile {
        /// The missing path.
        path: PathBuf,
    },

    /// A required destination directory is absent when a populate step is
    /// attempted (boundary with the external file-copy collaborator).
    #[error("destination directory not found: {path}")]
    DirectoryLayout {
        /// The missing directory.
        path: PathBuf,
    },

    /// Generic error with custom message. Created by [`crate::bail!`].
    #[error("{0}")]
    Message(String),
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with the crate's [`Error`]
/// type. Works with both `Result<T>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::Message(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::Message(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
///
/// The `context` should be a present-tense verb phrase describing the
/// operation, e.g., "reading template file", "inspecting icon".
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with error.
///
/// Converts the message into an [`Error::Message`] and returns immediately.
///
/// # Examples
///
/// ```ignore
/// bail!("operation failed");
/// bail!("invalid value: {}", value);
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::error::Error::Message($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::error::Error::Message($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::Message(format!($fmt, $($arg)*)))
    };
}
