use cfg_if::cfg_if;
pub use log::{debug, error, info, trace, warn};

cfg_if! {
    if #[cfg(feature = "logger_env")] {
        use crate::config::DEFAULT_LOG_LEVEL;
        use crate::Result;
        fn init_env_logger() {
            // a logger installed by the user or by an earlier init wins
            let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_LEVEL))
                .try_init();
        }
        pub fn logger_init(_: Option<String>) -> Result<()> {
            init_env_logger();
            Ok(())
        }
    }
    else if #[cfg(feature = "logger_log4rs")] {
        use crate::{Error, Result};
        use lazy_static::lazy_static;
        use std::path::Path;
        use std::sync::Once;

        lazy_static! {
            static ref LOG4RS_INIT_ONCE: Once = Once::new();
        }

        fn init_log4rs(file_name: Option<String>) -> Result<()> {
            let file_name = file_name.ok_or_else(|| Error::msg("Must provide a configuration file for log4rs crate"))?;
            let path = Path::new(&file_name);
            if !path.exists() {
                return Ok(());
            }
            // log4rs can only be installed once per process, later inits keep the first logger
            let mut res = Ok(());
            LOG4RS_INIT_ONCE.call_once(|| res = log4rs::init_file(path, Default::default()));
            res
        }
        pub fn logger_init(file_name: Option<String>) -> Result<()> {
            init_log4rs(file_name)
        }
    } else {
        pub fn logger_init(_: Option<String>) -> crate::Result<()> {
            Ok(())
        }
    }
}
