//! gencxx renders source code from Jinja templates and a directory of
//! YAML/JSON data files. Data files are merged into one namespace keyed by
//! file stem and exposed to templates as `data`.

/// Command-line interface module for the gencxx application
pub mod cli;

/// Renderer configuration and loader policies
pub mod config;

/// Common constants
pub mod constants;

/// Data directory loading into the data namespace
pub mod data;

/// Error types and handling for the gencxx application
pub mod error;

/// Logger setup
pub mod logger;

/// Writing rendered output to stdout or a file
pub mod output;

/// Core pipeline orchestration
pub mod processor;

/// Template lookup and MiniJinja rendering
pub mod renderer;
