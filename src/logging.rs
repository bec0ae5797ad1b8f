//! Internal logging helpers for structured seam events.

/// Single logging target for seam.
pub(crate) const LOG_TARGET: &str = "seam";

macro_rules! seam_log {
    ($level:expr, $event:expr, $fmt:expr $(, $args:expr)* $(,)?) => {{
        if log::log_enabled!($level) {
            log::log!(
                target: crate::logging::LOG_TARGET,
                $level,
                "event={} {}",
                $event,
                format_args!($fmt $(, $args)*)
            );
        }
    }};
}

pub(crate) use seam_log;
