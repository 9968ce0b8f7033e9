use log::LevelFilter;
use std::sync::{Mutex, PoisonError};

/// Most verbose level allowed while a `SilentMode` guard is alive.
const SILENT_LEVEL: LevelFilter = LevelFilter::Warn;

static STATE: Mutex<Option<SilentState>> = Mutex::new(None);

/// Level saved by the outermost guard and how many guards are alive
struct SilentState {
    previous: LevelFilter,
    depth: usize,
}

/// Scoped suppression of diagnostic output. While at least one guard is
/// alive, the global log level is lowered to `Warn` (and, on the ESP32, the
/// ESP-IDF component loggers too) so only data reaches the console. The
/// level that was active before the outermost guard is restored when the
/// last guard is dropped, on every exit path.
#[must_use = "diagnostics are restored as soon as the guard is dropped"]
pub struct SilentMode {
    _private: (),
}

impl SilentMode {
    /// Enters silent mode, returning the guard that keeps it active.
    pub fn enter() -> SilentMode {
        let mut state = STATE.lock().unwrap_or_else(PoisonError::into_inner);
        match state.as_mut() {
            Some(active) => active.depth += 1,
            None => {
                let previous = log::max_level();
                let silenced = previous.min(SILENT_LEVEL);
                log::set_max_level(silenced);
                platform::set_component_level(silenced);
                *state = Some(SilentState { previous, depth: 1 });
            }
        }
        SilentMode { _private: () }
    }
}

impl Drop for SilentMode {
    fn drop(&mut self) {
        let mut state = STATE.lock().unwrap_or_else(PoisonError::into_inner);
        let finished = match state.as_mut() {
            Some(active) => {
                active.depth -= 1;
                active.depth == 0
            }
            None => false,
        };
        if finished {
            if let Some(active) = state.take() {
                log::set_max_level(active.previous);
                platform::set_component_level(active.previous);
            }
        }
    }
}

#[cfg(target_os = "espidf")]
mod platform {
    use esp_idf_svc::sys::{
        esp_log_level_set, esp_log_level_t, esp_log_level_t_ESP_LOG_DEBUG,
        esp_log_level_t_ESP_LOG_ERROR, esp_log_level_t_ESP_LOG_INFO, esp_log_level_t_ESP_LOG_NONE,
        esp_log_level_t_ESP_LOG_VERBOSE, esp_log_level_t_ESP_LOG_WARN,
    };
    use log::LevelFilter;

    const ALL_TAGS: &[u8] = b"*\0";

    fn to_esp_level(level: LevelFilter) -> esp_log_level_t {
        match level {
            LevelFilter::Off => esp_log_level_t_ESP_LOG_NONE,
            LevelFilter::Error => esp_log_level_t_ESP_LOG_ERROR,
            LevelFilter::Warn => esp_log_level_t_ESP_LOG_WARN,
            LevelFilter::Info => esp_log_level_t_ESP_LOG_INFO,
            LevelFilter::Debug => esp_log_level_t_ESP_LOG_DEBUG,
            LevelFilter::Trace => esp_log_level_t_ESP_LOG_VERBOSE,
        }
    }

    /// Applies `level` to every ESP-IDF log tag.
    pub(super) fn set_component_level(level: LevelFilter) {
        unsafe { esp_log_level_set(ALL_TAGS.as_ptr() as *const _, to_esp_level(level)) }
    }
}

#[cfg(not(target_os = "espidf"))]
mod platform {
    use log::LevelFilter;

    pub(super) fn set_component_level(_level: LevelFilter) {}
}
