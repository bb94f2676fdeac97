//! Run configuration for gencxx.
//! Everything the loader and renderer need is carried explicitly in these
//! types; nothing is read from ambient global state.

use crate::constants::{AUTOESCAPE_EXTENSIONS, SEARCH_ROOTS};
use clap::ValueEnum;
use std::path::PathBuf;

/// How the renderer treats values that are not defined in the namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UndefinedMode {
    /// Any use of an undefined value is an error.
    #[default]
    Strict,
    /// Undefined values print as empty strings.
    Lenient,
    /// Attribute access on an undefined value stays undefined.
    Chainable,
}

impl From<UndefinedMode> for minijinja::UndefinedBehavior {
    fn from(mode: UndefinedMode) -> Self {
        match mode {
            UndefinedMode::Strict => minijinja::UndefinedBehavior::Strict,
            UndefinedMode::Lenient => minijinja::UndefinedBehavior::Lenient,
            UndefinedMode::Chainable => minijinja::UndefinedBehavior::Chainable,
        }
    }
}

/// What the data loader does when two files derive the same key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CollisionPolicy {
    /// The file walked last wins; a warning is logged.
    #[default]
    Overwrite,
    /// Fail the load.
    Error,
}

/// Template engine configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Roots a template name is resolved against, in order.
    pub search_roots: Vec<PathBuf>,
    /// Lowercase extensions for which HTML escaping is enabled.
    pub autoescape_extensions: Vec<String>,
    /// Drop the newline after a block tag.
    pub trim_blocks: bool,
    /// Keep the final newline of the template source.
    pub keep_trailing_newline: bool,
    pub undefined: UndefinedMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            search_roots: SEARCH_ROOTS.iter().map(PathBuf::from).collect(),
            autoescape_extensions: AUTOESCAPE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            trim_blocks: true,
            keep_trailing_newline: true,
            undefined: UndefinedMode::default(),
        }
    }
}

impl RenderConfig {
    /// Default configuration with the given undefined-value policy.
    pub fn with_undefined(undefined: UndefinedMode) -> Self {
        Self { undefined, ..Self::default() }
    }

    /// Whether output of the template called `name` should be HTML escaped.
    pub fn autoescapes(&self, name: &str) -> bool {
        match name.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_ascii_lowercase();
                self.autoescape_extensions.iter().any(|e| *e == ext)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.search_roots, vec![PathBuf::from("./"), PathBuf::from("/")]);
        assert!(config.trim_blocks);
        assert!(config.keep_trailing_newline);
        assert_eq!(config.undefined, UndefinedMode::Strict);
    }

    #[test]
    fn test_autoescapes() {
        let config = RenderConfig::default();
        assert!(config.autoescapes("out.html"));
        assert!(config.autoescapes("templates/feed.XML"));
        assert!(!config.autoescapes("out.cpp"));
        assert!(!config.autoescapes("out.html.j2"));
        assert!(!config.autoescapes("html"));
        assert!(!config.autoescapes("page.htm"));
    }
}
