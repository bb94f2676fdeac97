//! Error handling for gencxx.
//! Defines the error taxonomy, the result alias used throughout the crate
//! and the process exit codes each failure maps to.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for gencxx operations.
///
/// Every variant aborts the run: there is no partial output and no retry.
#[derive(Error, Debug)]
pub enum Error {
    /// The data directory is missing, is not a directory, or cannot be walked.
    #[error("Cannot read data directory '{}': {reason}.", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// A data file could not be parsed as structured data.
    #[error("Failed to parse data file '{}': {reason}.", path.display())]
    DataParseError { path: PathBuf, reason: String },

    /// Two data files derived the same key and collisions are not allowed.
    #[error(
        "Data key '{key}' defined by both '{}' and '{}'.",
        first.display(),
        second.display()
    )]
    DataKeyCollision { key: String, first: PathBuf, second: PathBuf },

    /// No template with this name under any search root.
    #[error("Template '{template}' not found: {source}.")]
    TemplateNotFoundError {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    /// The template file exists but could not be read (permissions, not UTF-8).
    #[error("Cannot read template '{template}': {source}.")]
    TemplateReadError {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    /// The template (or one it includes) is malformed.
    #[error("Syntax error in template '{template}': {source}.")]
    TemplateSyntaxError {
        template: String,
        line: Option<usize>,
        #[source]
        source: minijinja::Error,
    },

    /// Rendering failed, e.g. an undefined value was used.
    #[error("Failed to render template '{template}': {source}.")]
    TemplateRuntimeError {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    /// Writing the rendered result failed.
    #[error("Failed to write output '{target}': {source}.")]
    OutputWriteError {
        target: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Classifies a template engine error raised while loading or rendering
    /// `template`.
    pub fn from_template(template: &str, source: minijinja::Error) -> Self {
        let template = template.to_string();
        if is_read_failure(&source) {
            return Error::TemplateReadError { template, source };
        }
        match source.kind() {
            minijinja::ErrorKind::TemplateNotFound => {
                Error::TemplateNotFoundError { template, source }
            }
            minijinja::ErrorKind::SyntaxError => {
                let line = source.line();
                Error::TemplateSyntaxError { template, line, source }
            }
            _ => Error::TemplateRuntimeError { template, source },
        }
    }

    /// Process exit status for this error. `2` is left to clap usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::TemplateReadError { .. } => 1,
            Error::FilesystemError { .. } => 3,
            Error::DataParseError { .. } => 4,
            Error::DataKeyCollision { .. } => 5,
            Error::TemplateNotFoundError { .. } => 6,
            Error::TemplateSyntaxError { .. } => 7,
            Error::TemplateRuntimeError { .. } => 8,
            Error::OutputWriteError { .. } => 9,
        }
    }

    /// The underlying template engine error, if this failure came from it.
    pub fn template_error(&self) -> Option<&minijinja::Error> {
        match self {
            Error::TemplateNotFoundError { source, .. }
            | Error::TemplateReadError { source, .. }
            | Error::TemplateSyntaxError { source, .. }
            | Error::TemplateRuntimeError { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Whether the engine error wraps an I/O failure raised by the template loader.
fn is_read_failure(err: &minijinja::Error) -> bool {
    std::error::Error::source(err).is_some_and(|cause| cause.is::<io::Error>())
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// When debug logging is enabled and the error came from the template
/// engine, the engine's source excerpt around the failing line is printed
/// as well.
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    if log::log_enabled!(log::Level::Debug) {
        if let Some(source) = err.template_error() {
            eprintln!("{}", source.display_debug_info());
        }
    }
    std::process::exit(err.exit_code());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_errors_are_classified_by_kind() {
        let not_found = minijinja::Error::new(
            minijinja::ErrorKind::TemplateNotFound,
            "template does not exist",
        );
        let err = Error::from_template("main.cpp.j2", not_found);
        assert!(matches!(err, Error::TemplateNotFoundError { .. }));
        assert_eq!(err.exit_code(), 6);

        let runtime = minijinja::Error::new(
            minijinja::ErrorKind::UndefinedError,
            "undefined value",
        );
        let err = Error::from_template("main.cpp.j2", runtime);
        assert!(matches!(err, Error::TemplateRuntimeError { .. }));
        assert!(err.template_error().is_some());
    }

    #[test]
    fn test_loader_io_failure_is_a_read_error() {
        let unreadable = minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            "could not read template",
        )
        .with_source(io::Error::new(
            io::ErrorKind::InvalidData,
            "stream did not contain valid UTF-8",
        ));
        let err = Error::from_template("main.cpp.j2", unreadable);
        assert!(matches!(err, Error::TemplateReadError { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(err.template_error().is_some());
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            Error::from_template(
                "t",
                minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, "x")
                    .with_source(io::Error::other("x")),
            ),
            Error::FilesystemError { path: "d".into(), reason: "x".into() },
            Error::DataParseError { path: "f".into(), reason: "x".into() },
            Error::DataKeyCollision {
                key: "k".into(),
                first: "a/k.yaml".into(),
                second: "b/k.yaml".into(),
            },
            Error::from_template(
                "t",
                minijinja::Error::new(minijinja::ErrorKind::TemplateNotFound, "x"),
            ),
            Error::from_template(
                "t",
                minijinja::Error::new(minijinja::ErrorKind::SyntaxError, "x"),
            ),
            Error::from_template(
                "t",
                minijinja::Error::new(minijinja::ErrorKind::UndefinedError, "x"),
            ),
            Error::OutputWriteError { target: "o".into(), source: io::Error::other("x") },
        ];
        let mut codes: Vec<i32> = errors.iter().map(Error::exit_code).collect();
        assert!(codes.iter().all(|c| *c != 0 && *c != 2));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
