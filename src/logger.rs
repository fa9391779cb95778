//! Colored, timestamped console output.
//!
//! All macros take `format!` arguments. Lines go to stdout with a UTC wall clock
//! timestamp, per-tick output is gated behind `LOG_HAB_EVENTS`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
    ($color:literal, $tag:literal, $($arg:tt)*) => {
        println!(
            concat!("\x1b[", $color, "m[", $tag, "][{}]\x1b[0m {}"),
            chrono::Utc::now().format("%H:%M:%S%.3f"),
            format!($($arg)*)
        )
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::__log_line!("32", "INFO ", $($arg)*) };
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => { $crate::__log_line!("33", "LOG  ", $($arg)*) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::__log_line!("35", "WARN ", $($arg)*) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::__log_line!("31", "ERROR", $($arg)*) };
}

/// Landing forecast summaries.
#[macro_export]
macro_rules! forecast {
    ($($arg:tt)*) => { $crate::__log_line!("1;34", "FCST ", $($arg)*) };
}

/// Per-tick telemetry, only printed with `LOG_HAB_EVENTS` set.
#[macro_export]
macro_rules! event {
    ($($arg:tt)*) => {
        if std::env::var_os("LOG_HAB_EVENTS").is_some() {
            $crate::__log_line!("36", "EVENT", $($arg)*)
        }
    };
}
