//! Environment configuration.

use std::env;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub fps: Option<u32>,
    pub debug: bool,
    pub write_log: Option<String>,
    pub no_mouse: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            fps: env_string_opt("SLATE_FPS").and_then(|value| value.parse().ok()),
            debug: env_flag("SLATE_DEBUG"),
            write_log: env_string_opt("SLATE_WRITE_LOG"),
            no_mouse: env_flag("SLATE_NO_MOUSE"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::EnvConfig;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults_are_unset() {
        let _lock = env_lock();
        let _g1 = set_env_guard("SLATE_FPS", None);
        let _g2 = set_env_guard("SLATE_DEBUG", None);
        let _g3 = set_env_guard("SLATE_WRITE_LOG", None);
        let _g4 = set_env_guard("SLATE_NO_MOUSE", None);

        let config = EnvConfig::from_env();
        assert!(config.fps.is_none());
        assert!(!config.debug);
        assert!(config.write_log.is_none());
        assert!(!config.no_mouse);
    }

    #[test]
    fn env_values_are_parsed() {
        let _lock = env_lock();
        let _g1 = set_env_guard("SLATE_FPS", Some("30"));
        let _g2 = set_env_guard("SLATE_DEBUG", Some("1"));
        let _g3 = set_env_guard("SLATE_WRITE_LOG", Some("/tmp/slate.log"));
        let _g4 = set_env_guard("SLATE_NO_MOUSE", Some("1"));

        let config = EnvConfig::from_env();
        assert_eq!(config.fps, Some(30));
        assert!(config.debug);
        assert_eq!(config.write_log.as_deref(), Some("/tmp/slate.log"));
        assert!(config.no_mouse);
    }

    #[test]
    fn invalid_fps_is_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard("SLATE_FPS", Some("fast"));
        let config = EnvConfig::from_env();
        assert!(config.fps.is_none());
    }
}
