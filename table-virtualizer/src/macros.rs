// Log under the crate's own target. Arguments are not evaluated without `tracing`.
#[cfg(feature = "tracing")]
macro_rules! tlog {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "table_virtualizer", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! tlog {
    ($level:ident, $($tt:tt)*) => {};
}

/// Per-event chatter: scroll samples, timer restarts, ignored events.
macro_rules! ttrace {
    ($($tt:tt)*) => { tlog!(trace, $($tt)*) };
}

/// Lifecycle: mount, unmount, snapshot replacement, column changes.
macro_rules! tdebug {
    ($($tt:tt)*) => { tlog!(debug, $($tt)*) };
}

/// Inputs the engine had to correct, like a zero row height or an out-of-range window.
macro_rules! twarn {
    ($($tt:tt)*) => { tlog!(warn, $($tt)*) };
}
