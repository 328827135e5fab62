//! Error handling for the release tools
//!
//! Failures are modelled as a single strongly-typed enum, [`ReleaseError`], that
//! travels through `anyhow::Result` like any other error. At the binary boundary
//! [`user_friendly_error`] turns whatever came back into an [`ErrorContext`]
//! (message, details, suggestion) and [`exit_code`] decides the process exit
//! status.
//!
//! # Error Categories
//!
//! - **Configuration**: [`ReleaseError::MissingCredential`], [`ReleaseError::MissingEnvVar`]
//! - **Not found**: [`ReleaseError::NoArtifacts`], [`ReleaseError::NoReleaseAsset`],
//!   [`ReleaseError::ArchiveRootMissing`]
//! - **Transport**: [`ReleaseError::HttpStatus`], [`ReleaseError::NetworkError`]
//! - **Filesystem and archives**: [`ReleaseError::FileSystemError`], [`ReleaseError::ArchiveError`]
//! - **Parsing**: [`ReleaseError::DescriptorParseError`], [`ReleaseError::InvalidCommitTimestamp`]
//! - **Subprocesses**: [`ReleaseError::CommandFailed`], [`ReleaseError::CommandNotFound`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use release_kit::core::{ReleaseError, exit_code, user_friendly_error};
//!
//! let error = anyhow::Error::from(ReleaseError::MissingEnvVar {
//!     name: "GITHUB_SHA".to_string(),
//! });
//!
//! assert_eq!(exit_code(&error), 1);
//! user_friendly_error(error).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The error type for every release tool operation.
///
/// Variants carry plain strings so the error stays `Clone` and can be moved
/// into an [`ErrorContext`] after being downcast from `anyhow::Error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReleaseError {
    /// No personal access token was supplied as argument or environment variable.
    #[error("GitHub token not set: pass it as an argument or set {variable}")]
    MissingCredential {
        /// The environment variable that was consulted
        variable: String,
    },

    /// A required CI environment variable is unset or empty.
    #[error("Environment variable {name} is not set")]
    MissingEnvVar {
        /// Name of the missing variable
        name: String,
    },

    /// The artifacts listing came back empty.
    #[error("No artifacts found for repository {repo}")]
    NoArtifacts {
        /// Repository that was queried
        repo: String,
    },

    /// The latest release has no asset with the wanted content type.
    #[error("Latest release of {repo} has no {content_type} asset")]
    NoReleaseAsset {
        /// Repository that was queried
        repo: String,
        /// Content type that was searched for
        content_type: String,
    },

    /// The release archive did not contain the expected top-level directory.
    #[error("Release archive did not produce directory {path}")]
    ArchiveRootMissing {
        /// Expected directory
        path: String,
    },

    /// A remote call answered with a non-success status code.
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// Status code returned by the server
        status: u16,
    },

    /// A request could not be sent or its body could not be read.
    #[error("Network error during {operation}: {reason}")]
    NetworkError {
        /// What was being requested
        operation: String,
        /// Underlying transport error
        reason: String,
    },

    /// A filesystem operation failed.
    #[error("File system error during {operation} of {path}: {reason}")]
    FileSystemError {
        /// The operation that failed (e.g. "rename", "chmod")
        operation: String,
        /// Path involved in the operation
        path: String,
        /// OS error reported for the operation
        reason: String,
    },

    /// A downloaded archive could not be opened or extracted.
    #[error("Failed to extract archive {path}: {reason}")]
    ArchiveError {
        /// Archive location
        path: String,
        /// Reason reported by the zip reader
        reason: String,
    },

    /// A JSON descriptor could not be parsed or lacks a required field.
    #[error("Invalid descriptor {file}: {reason}")]
    DescriptorParseError {
        /// Descriptor path
        file: String,
        /// Parser message
        reason: String,
    },

    /// `git show` printed something other than a unix timestamp.
    #[error("Invalid commit timestamp: '{value}'")]
    InvalidCommitTimestamp {
        /// Raw output of the git command
        value: String,
    },

    /// An external command exited unsuccessfully.
    #[error("Command `{command}` failed with {}", describe_exit(.code))]
    CommandFailed {
        /// The command line that was run
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Captured standard error, empty when stdio was inherited
        stderr: String,
    },

    /// An external program could not be found on `PATH`.
    #[error("{program} is not installed or not found in PATH")]
    CommandNotFound {
        /// Program name
        program: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl ReleaseError {
    /// Process exit status for this error.
    ///
    /// Failing subprocesses propagate their own code; everything else exits with `1`.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed {
                code: Some(code),
                ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Exit status for any error returned by a release tool.
///
/// Looks through the `anyhow` chain for a [`ReleaseError`] so that context
/// added on top does not hide a subprocess exit code.
#[must_use]
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ReleaseError>())
        .map_or(1, ReleaseError::exit_code)
}

/// A [`ReleaseError`] (or free-form message) with optional details and suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`ReleaseError`].
    #[must_use]
    pub fn new(error: &ReleaseError) -> Self {
        Self::message(error.to_string())
    }

    /// Create a context carrying only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colours.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with an actionable suggestion.
///
/// Errors that are, or wrap, a [`ReleaseError`] get a tailored suggestion;
/// anything else is rendered with its full cause chain.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(release_error) =
        error.chain().find_map(|cause| cause.downcast_ref::<ReleaseError>())
    {
        let context = create_error_context(release_error);
        let outer = error.to_string();

        // Keep the operation context added on top of the typed error
        if outer != context.message && context.details.is_none() {
            return context.with_details(outer);
        }
        return context;
    }

    if let Some(io_error) = error.chain().find_map(|cause| cause.downcast_ref::<std::io::Error>())
        && io_error.kind() == std::io::ErrorKind::PermissionDenied
    {
        return ErrorContext::message(format_chain(&error))
            .with_suggestion("Check file ownership or re-run with sufficient permissions");
    }

    ErrorContext::message(format_chain(&error))
}

fn format_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

fn create_error_context(error: &ReleaseError) -> ErrorContext {
    let context = ErrorContext::new(error);

    match error {
        ReleaseError::MissingCredential {
            variable,
        } => context.with_suggestion(format!(
            "Create a personal access token with `actions:read` scope and export it as {variable}"
        )),
        ReleaseError::MissingEnvVar {
            ..
        } => context.with_suggestion(
            "Run inside GitHub Actions or export GITHUB_REPOSITORY, GITHUB_SHA, GITHUB_RUN_ID and GITHUB_REF_NAME",
        ),
        ReleaseError::NoArtifacts {
            ..
        } => context
            .with_details("Artifacts expire after the repository's retention period")
            .with_suggestion("Re-run the CI build to produce a fresh artifact"),
        ReleaseError::NoReleaseAsset {
            ..
        } => context.with_suggestion("Check that the latest release has a packaged plugin zip attached"),
        ReleaseError::HttpStatus {
            status: 401 | 403,
            ..
        } => context.with_suggestion("Check that the token is valid and has not hit the rate limit"),
        ReleaseError::HttpStatus {
            status: 404,
            ..
        } => context.with_suggestion("Check the repository name and that the token can access it"),
        ReleaseError::NetworkError {
            ..
        } => context.with_suggestion("Check your network connection and try again"),
        ReleaseError::CommandNotFound {
            program,
        } => context.with_suggestion(format!("Install {program} and make sure it is on PATH")),
        ReleaseError::CommandFailed {
            stderr,
            ..
        } if !stderr.trim().is_empty() => context.with_details(stderr.trim().to_string()),
        ReleaseError::InvalidCommitTimestamp {
            ..
        } => context.with_suggestion("Run the tool from inside a git checkout with at least one commit"),
        _ => context,
    }
}
