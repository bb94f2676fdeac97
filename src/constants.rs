//! Common constants used throughout gencxx.

/// Name under which the data namespace is bound inside templates.
pub const DATA_BINDING: &str = "data";

/// `OUT` placeholder that selects standard output.
pub const STDOUT_PLACEHOLDER: &str = "-";

/// Template search roots, tried in order.
pub const SEARCH_ROOTS: [&str; 2] = ["./", "/"];

/// Template extensions that turn on HTML escaping.
pub const AUTOESCAPE_EXTENSIONS: [&str; 2] = ["html", "xml"];
