/// Configures the global `env_logger` backend.
///
/// Verbose runs log at debug level; otherwise only warnings and errors are
/// shown. All log output goes to stderr so generated code on stdout stays
/// clean.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();
}
