use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

pub fn initialize_logger(level: LevelFilter) {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("ping_tester_lib", level)
            .filter_module("ping_tester", level)
            .format_timestamp_millis()
            .parse_default_env();

        // Someone else may already own the global logger.
        let _ = builder.try_init();
    });
}
