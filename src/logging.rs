#![allow(unused_macros)]

//! Log macros that vanish unless the `logging` feature is on.
//!
//! Arguments are still type-checked through `format_args!` so that
//! variables used only for logging do not trigger warnings in the
//! default build. Without an explicit `target:` events go to `growarr`.

macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {{
        #[cfg(feature = "logging")]
        log::debug!(target: $target, $($arg)+);
        #[cfg(not(feature = "logging"))]
        let _ = ($target, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => (
        debug!(target: "growarr", $($arg)+)
    );
}

macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {{
        #[cfg(feature = "logging")]
        log::trace!(target: $target, $($arg)+);
        #[cfg(not(feature = "logging"))]
        let _ = ($target, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => (
        trace!(target: "growarr", $($arg)+)
    );
}

#[cfg(test)]
mod tests {
    #[test]
    fn both_macro_forms_expand() {
        let slots = 4;
        debug!("grow {} slots", slots);
        debug!(target: "growarr::capacity", "grow {} slots", slots);
        trace!("release {} bytes", slots * 8);
        trace!(target: "growarr::storage", "release {} bytes", slots * 8);
    }
}
