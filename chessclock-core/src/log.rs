//! Diagnostic logging
//!
//! Forwards to `defmt` when the `defmt` feature is enabled. Without it the
//! macros evaluate nothing and only borrow their arguments.

#[cfg(feature = "defmt")]
pub(crate) use defmt::{debug, info, warn};

#[cfg(not(feature = "defmt"))]
macro_rules! log_noop {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        $( let _ = &$arg; )*
    }};
}

#[cfg(not(feature = "defmt"))]
pub(crate) use log_noop as debug;
#[cfg(not(feature = "defmt"))]
pub(crate) use log_noop as info;
#[cfg(not(feature = "defmt"))]
pub(crate) use log_noop as warn;
