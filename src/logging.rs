use tracing_subscriber::EnvFilter;

/// Initialize logging for the CLI.
///
/// Defaults to `info` (or `debug` when `verbose` is set) unless overridden by
/// `AUTOSUB_LOG`. Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool) {
    let default_level = if verbose {
        tracing::level_filters::LevelFilter::DEBUG
    } else {
        tracing::level_filters::LevelFilter::INFO
    };

    let filter = EnvFilter::builder()
        .with_env_var("AUTOSUB_LOG")
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init(false);
        init(true);
    }
}
