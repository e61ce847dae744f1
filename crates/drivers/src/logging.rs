use env_logger::{Builder, Env};

pub fn init_logging() {
    // A second init (tests, embedding) keeps the first logger.
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
