//! Call-site capture and entry/exit macros.
//!
//! `call_site!` names the caller without stack inspection: the class is the
//! invoking module's path and the line is the macro's line. The tracing macros
//! route through the process-wide logger in [`global`](crate::global).

/// Build a [`CallSite`](crate::CallSite) for the current location.
///
/// ```
/// let site = smartlog::call_site!("load_assets");
/// assert_eq!(site.method, "load_assets");
/// assert_eq!(site.class, module_path!());
///
/// let site = smartlog::call_site!("app.Renderer", "draw");
/// assert_eq!(site.class, "app.Renderer");
/// ```
#[macro_export]
macro_rules! call_site {
    ($method:expr) => {
        $crate::CallSite::new(module_path!(), $method, line!())
    };
    ($class:expr, $method:expr) => {
        $crate::CallSite::new($class, $method, line!())
    };
}

/// Entry marker on the process-wide logger.
///
/// `entry!("method")` or `entry!("method", id = "label")`.
#[macro_export]
macro_rules! entry {
    ($method:expr) => {
        $crate::global::entry($crate::call_site!($method), None)
    };
    ($method:expr, id = $id:expr) => {
        $crate::global::entry($crate::call_site!($method), Some($id))
    };
}

/// Exit marker on the process-wide logger.
///
/// `exit!("method")` or `exit!("method", id = "label")`.
#[macro_export]
macro_rules! exit {
    ($method:expr) => {
        $crate::global::exit($crate::call_site!($method), None)
    };
    ($method:expr, id = $id:expr) => {
        $crate::global::exit($crate::call_site!($method), Some($id))
    };
}

/// Exit marker that evaluates to `$value`.
///
/// `exit_and_return!("method", value)` or
/// `exit_and_return!("method", id = "label", value)`.
///
/// ```
/// fn answer() -> u32 {
///     smartlog::entry!("answer");
///     smartlog::exit_and_return!("answer", 42)
/// }
/// assert_eq!(answer(), 42);
/// ```
#[macro_export]
macro_rules! exit_and_return {
    ($method:expr, id = $id:expr, $value:expr) => {
        $crate::global::exit_and_return($crate::call_site!($method), Some($id), $value)
    };
    ($method:expr, $value:expr) => {
        $crate::global::exit_and_return($crate::call_site!($method), None, $value)
    };
}
