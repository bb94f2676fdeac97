//! Core generation pipeline: load data, render the template, hand back the
//! result. Writing it out is left to the caller.

use crate::config::CollisionPolicy;
use crate::data::{load_data, DataNamespace};
use crate::error::Result;
use crate::renderer::TemplateRenderer;
use log::debug;
use std::path::Path;

/// Loads the data namespace, or an empty one if no directory was given.
pub fn load_namespace(
    datadir: Option<&Path>,
    on_collision: CollisionPolicy,
) -> Result<DataNamespace> {
    let namespace = match datadir {
        Some(dir) => load_data(dir, on_collision)?,
        None => DataNamespace::new(),
    };
    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string_pretty(&namespace) {
            Ok(dump) => debug!("Data namespace:\n{}", dump),
            Err(e) => debug!("Data namespace could not be dumped: {}", e),
        }
    }
    Ok(namespace)
}

/// Runs the whole pipeline and returns the rendered text.
///
/// Nothing is rendered unless every data file loaded.
pub fn generate(
    renderer: &dyn TemplateRenderer,
    template: &str,
    datadir: Option<&Path>,
    on_collision: CollisionPolicy,
) -> Result<String> {
    let namespace = load_namespace(datadir, on_collision)?;
    debug!("Rendering '{}' with {} data keys", template, namespace.len());
    renderer.render(template, &namespace)
}
