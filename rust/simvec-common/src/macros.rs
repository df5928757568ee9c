/// Asserts a caller contract.
///
/// Contract checks are compiled in for debug builds only, unless the
/// crate invoking the macro enables its `strict-contracts` feature, in which
/// case they are checked in every build.
///
/// The `cfg!` is expanded in the calling crate, so the feature switch is the
/// caller's own: a crate that uses `contract!` must declare
/// `strict-contracts = []` under `[features]`. Without that entry the check
/// follows `debug_assertions` only and the build emits an `unexpected_cfgs`
/// warning. Enabling the feature on `simvec-common` itself has no effect.
#[macro_export]
macro_rules! contract {
    ($cond:expr, $($arg:tt)+) => {{
        if cfg!(any(debug_assertions, feature = "strict-contracts")) {
            assert!($cond, $($arg)+);
        }
    }};
}
