use std::fmt::{Debug, Display};

/// Unwraps the `Err` variant of `$e`, panicking with the `Ok` value
/// otherwise. Extra arguments are formatted into the panic message.
#[macro_export]
macro_rules! assert_err {
    ($e:expr) => {
        $crate::result::unwrap_err($e, stringify!($e), format_args!(""))
    };
    ($e:expr, $($t:tt)+) => {
        $crate::result::unwrap_err($e, stringify!($e), format_args!($($t)+))
    };
}

/// Unwraps the `Ok` variant of `$e`, panicking with the error's display
/// output otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        $crate::result::unwrap_ok($e, stringify!($e))
    };
}

#[doc(hidden)]
#[track_caller]
pub fn unwrap_err<T: Debug, E>(result: Result<T, E>, expr: &str, note: std::fmt::Arguments<'_>) -> E {
    match result {
        Err(e) => e,
        Ok(value) => {
            let note = note.to_string();
            if note.is_empty() {
                panic!("expected `{expr}` to fail; actual=Ok({value:?})")
            } else {
                panic!("expected `{expr}` to fail; actual=Ok({value:?}), {note}")
            }
        }
    }
}

#[doc(hidden)]
#[track_caller]
pub fn unwrap_ok<T, E: Display>(result: Result<T, E>, expr: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("expected `{expr}` to succeed; actual=Err({e})"),
    }
}
