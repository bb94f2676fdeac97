//! Template resolution and rendering for gencxx.
//! Templates are looked up along a search path and rendered with MiniJinja,
//! with the data namespace bound as the single variable `data`.
use crate::config::RenderConfig;
use crate::constants::DATA_BINDING;
use crate::data::DataNamespace;
use crate::error::{Error, Result};
use log::debug;
use minijinja::{AutoEscape, Environment, ErrorKind, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Resolves the template called `template` and renders it against `data`.
    ///
    /// # Errors
    /// * `Error::TemplateNotFoundError` if no search root holds the template
    /// * `Error::TemplateReadError` if the template file cannot be read
    /// * `Error::TemplateSyntaxError` if the template is malformed
    /// * `Error::TemplateRuntimeError` if rendering fails
    fn render(&self, template: &str, data: &DataNamespace) -> Result<String>;

    /// Renders `source` as if it were the template called `name`.
    ///
    /// This is the engine's source-level capability: callers that already
    /// hold template text (generated or embedded) render it without a file.
    /// `name` still drives autoescaping and error messages, and includes
    /// inside `source` resolve along the search path.
    fn render_named_str(&self, name: &str, source: &str, data: &DataNamespace)
        -> Result<String>;
}

/// Splits a template name into path segments.
///
/// Empty and `.` segments are dropped, so leading slashes do not make a name
/// absolute. Returns `None` if any segment is `..` or nothing is left.
pub fn split_template_name(name: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    for segment in name.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            segment => segments.push(segment),
        }
    }
    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

/// Ordered list of directories template names are resolved against.
#[derive(Debug, Clone)]
pub struct SearchPath {
    roots: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Returns the first `root/name` that is an existing file.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let segments = split_template_name(name)?;
        self.roots
            .iter()
            .map(|root| segments.iter().fold(root.clone(), |path, s| path.join(s)))
            .find(|candidate| candidate.is_file())
    }

    /// Loader callback: the source of the template, or `None` if not found.
    fn load(&self, name: &str) -> std::result::Result<Option<String>, minijinja::Error> {
        let Some(path) = self.resolve(name) else {
            debug!("Template '{}' not found in {:?}", name, self.roots);
            return Ok(None);
        };
        debug!("Resolved template '{}' to '{}'", name, path.display());
        fs::read_to_string(&path).map(Some).map_err(|e| {
            minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("could not read template '{}'", path.display()),
            )
            .with_source(e)
        })
    }
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer whose environment follows `config`.
    pub fn new(config: RenderConfig) -> Self {
        let mut env = Environment::new();

        let search_path = SearchPath::new(config.search_roots.clone());
        env.set_loader(move |name| search_path.load(name));

        env.set_trim_blocks(config.trim_blocks);
        env.set_keep_trailing_newline(config.keep_trailing_newline);
        env.set_undefined_behavior(config.undefined.into());
        env.set_auto_escape_callback(move |name| {
            if config.autoescapes(name) {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });

        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new(RenderConfig::default())
    }
}

fn bindings(data: &DataNamespace) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([(DATA_BINDING, Value::from_serialize(data))])
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, data: &DataNamespace) -> Result<String> {
        let tmpl =
            self.env.get_template(template).map_err(|e| Error::from_template(template, e))?;
        tmpl.render(bindings(data)).map_err(|e| Error::from_template(template, e))
    }

    fn render_named_str(
        &self,
        name: &str,
        source: &str,
        data: &DataNamespace,
    ) -> Result<String> {
        self.env
            .render_named_str(name, source, bindings(data))
            .map_err(|e| Error::from_template(name, e))
    }
}
