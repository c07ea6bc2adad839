/// Domain-aware logging macros.
///
/// Each macro injects a `domain` field automatically so callers never need to
/// remember the string literal.  Domains used in this crate: `rule` (dispatch
/// and evaluation), `prov` (provider lookups), `conf` (loading rule files and
/// building registries).
///
/// # Usage
///
/// ```ignore
/// rd_debug!(rule, rule_type = %tag, "unknown rule type");
/// rd_warn!(prov, plugin = slug, error = %e, "plugin lookup failed");
/// ```
///
/// The domain identifier is a bare identifier, not a string.

/// Internal helper.  Do not call directly; use `rd_error!` … `rd_trace!`.
#[doc(hidden)]
macro_rules! rd_log {
    ($level:ident, $domain:ident, $($field:tt)*) => {
        tracing::$level!(domain = stringify!($domain), $($field)*)
    };
}

#[allow(unused_macros)]
macro_rules! rd_error {
    ($domain:ident, $($rest:tt)*) => {
        rd_log!(error, $domain, $($rest)*)
    };
}

macro_rules! rd_warn {
    ($domain:ident, $($rest:tt)*) => {
        rd_log!(warn, $domain, $($rest)*)
    };
}

#[allow(unused_macros)]
macro_rules! rd_info {
    ($domain:ident, $($rest:tt)*) => {
        rd_log!(info, $domain, $($rest)*)
    };
}

macro_rules! rd_debug {
    ($domain:ident, $($rest:tt)*) => {
        rd_log!(debug, $domain, $($rest)*)
    };
}

macro_rules! rd_trace {
    ($domain:ident, $($rest:tt)*) => {
        rd_log!(trace, $domain, $($rest)*)
    };
}
