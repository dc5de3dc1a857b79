// Copyright 2024-2025 Irreducible Inc.

/// Asserts that a condition holds, and otherwise reports the condition, an
/// explanation, the source location and the values of the listed variables
/// before halting the process.
///
/// Each variable is written as `(type) expr`, where `type` is one of `int`,
/// `char`, `double`, `float`, `long int`, or anything ending in `*` for a
/// pointer. `expr` is printed as its own name, so it should be written
/// without whitespace or parentheses: `x`, `&x`, `point.y`, `a[0]`.
/// Nothing beyond `cond` is evaluated while the condition holds.
///
/// ```
/// use adv_assert::adv_assert;
///
/// let x: i32 = 23;
/// let some_double: f64 = 19.42;
/// adv_assert!(
///     x < 30,
///     "x is too big",
///     (int) x,
///     (double) some_double,
///     (double *) &some_double
/// );
/// ```
#[macro_export]
macro_rules! adv_assert {
    ($cond:expr, $expl:expr $(,)?) => {
        if !$cond {
            $crate::report_failure(
                &$crate::AssertionSite {
                    condition: stringify!($cond),
                    explanation: $expl,
                    file: file!(),
                    line: line!(),
                    spec: "",
                },
                0,
                &[],
            );
        }
    };

    (
        $cond:expr, $expl:expr,
        $(
            ( $($ty:tt)+ ) $val:expr
        ),+ $(,)?
    ) => {
        if !$cond {
            // Turn the whole list back into text at compile time, the
            // runtime parser recovers names and types from it.
            let values = [$( $crate::Value::from($val) ),+];
            $crate::report_failure(
                &$crate::AssertionSite {
                    condition: stringify!($cond),
                    explanation: $expl,
                    file: file!(),
                    line: line!(),
                    spec: stringify!($( ( $($ty)+ ) $val ),+),
                },
                values.len(),
                &values,
            );
        }
    };
}

/// Same as [`adv_assert!`], but only checked when `debug_assertions` are on.
#[macro_export]
macro_rules! debug_adv_assert {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::adv_assert!($($arg)*);
        }
    };
}
