//! Diagnostics of table parsing and charstring interpretation.
//!
//! With the `logging` feature, messages are forwarded to the `log` crate:
//! - `ldebug!` reports the detected font kind of a parsed table.
//! - `lwarn!` reports rejected tables and operators.
//! - `ltrace!` dumps every charstring operator with its operand stack.
//!
//! Without the feature, the macros only borrow their arguments.

macro_rules! lforward {
    ($level:ident, $fmt:literal $(, $($arg:expr),* $(,)?)?) => {
        #[cfg(feature = "logging")]
        ::log::$level!($fmt $(, $($arg),*)?);
        #[cfg(not(feature = "logging"))]
        { $($(let _ = &$arg;)*)? }
    };
}

macro_rules! ldebug {
    ($($tt:tt)*) => {
        lforward!(debug, $($tt)*)
    };
}

macro_rules! ltrace {
    ($($tt:tt)*) => {
        lforward!(trace, $($tt)*)
    };
}

macro_rules! lwarn {
    ($($tt:tt)*) => {
        lforward!(warn, $($tt)*)
    };
}
