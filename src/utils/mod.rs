pub mod delay;
pub mod logger_error;
pub mod silent_mode;
