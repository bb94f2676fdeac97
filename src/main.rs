//! gencxx's main application entry point.
//! Parses the command line, renders the template and writes the result.

use gencxx::{
    cli::{get_args, Args},
    config::RenderConfig,
    error::{default_error_handler, Result},
    logger::init_logger,
    output::write_output,
    processor::generate,
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the data directory, if one was given
/// 2. Resolves and renders the template
/// 3. Writes the result to the output target
///
/// The output file is only opened once rendering succeeded.
fn run(args: Args) -> Result<()> {
    let renderer = MiniJinjaRenderer::new(RenderConfig::with_undefined(args.undefined));

    let rendered = generate(
        &renderer,
        &args.template,
        args.datadir.as_deref(),
        args.on_collision,
    )?;

    write_output(&rendered, &args.output)
}
