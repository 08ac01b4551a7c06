/// Logs at an explicit level, capturing the call site.
///
/// `log_at!(Level::Warn, "...")` uses the process-wide registry,
/// `log_at!(logger: &registry, Level::Warn, "...")` an explicit one.
/// Write errors are dropped; call [`Registry::emit`](crate::Registry::emit)
/// to observe them.
#[macro_export]
macro_rules! log_at {
    (logger: $registry:expr, $level:expr, $($arg:tt)+) => {{
        let _ = $registry.emit(
            $level,
            $crate::Caller::new(file!(), line!(), module_path!()),
            format_args!($($arg)+),
        );
    }};
    ($level:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $crate::global(), $level, $($arg)+)
    };
}

#[macro_export]
macro_rules! trace {
    (logger: $registry:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $registry, $crate::Level::Trace, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    (logger: $registry:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $registry, $crate::Level::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    (logger: $registry:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $registry, $crate::Level::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! msg {
    (logger: $registry:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $registry, $crate::Level::Msg, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Msg, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    (logger: $registry:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $registry, $crate::Level::Warn, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    (logger: $registry:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $registry, $crate::Level::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical {
    (logger: $registry:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $registry, $crate::Level::Critical, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Critical, $($arg)+)
    };
}

#[macro_export]
macro_rules! fatal {
    (logger: $registry:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $registry, $crate::Level::Fatal, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Fatal, $($arg)+)
    };
}

/// Shows a message plainly on the console while persisting it with the full
/// header. See [`Registry::feedback`](crate::Registry::feedback).
#[macro_export]
macro_rules! feedback {
    (logger: $registry:expr, $($arg:tt)+) => {{
        let _ = $registry.feedback(
            $crate::Caller::new(file!(), line!(), module_path!()),
            format_args!($($arg)+),
        );
    }};
    ($($arg:tt)+) => {
        $crate::feedback!(logger: $crate::global(), $($arg)+)
    };
}
