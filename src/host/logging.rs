use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the global logger once; later calls are ignored.
///
/// `RUST_LOG` wins over `filter`; with neither set the level is `info`.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(env) = std::env::var("RUST_LOG") {
            builder.parse_filters(&env);
        } else if let Some(filter) = filter {
            builder.parse_filters(filter);
        } else {
            builder
                .filter_level(log::LevelFilter::Info)
                .filter_module("wgpu_core", log::LevelFilter::Warn)
                .filter_module("wgpu_hal", log::LevelFilter::Warn);
        }

        builder.init();
        log::debug!("logging initialized");
    });
}
