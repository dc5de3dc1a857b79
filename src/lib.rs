//! Assertions that print the values of selected variables before halting.
//!
//! # Overview
//! [`adv_assert!`] checks a condition like `assert!`. When the condition is
//! false it writes a report to stderr and aborts the process. The report holds
//! the failed condition, an explanation, the source location and one
//! `name = value` line for each variable listed after the explanation.
//!
//! Variables are listed as `(type) expr`, usually a plain name. The macro turns the list back into
//! text, and at report time the list is parsed to recover each name and its
//! type, which decides how the value is printed:
//!
//! | type         | printed as    |
//! |--------------|---------------|
//! | `int`        | `%d`          |
//! | `char`       | `%c`          |
//! | `double`     | `%f`          |
//! | `float`      | `%f`          |
//! | `long int`   | `%ld`         |
//! | `... *`      | `%p`          |
//!
//! ```
//! use adv_assert::adv_assert;
//!
//! fn check(x: i32, some_double: f64) {
//!     adv_assert!(x < 19, "x is too big", (int) x, (double) some_double);
//! }
//!
//! fn main() {
//!     check(5, 19.42);
//! }
//! ```
//!
//! A failing call prints something like:
//! ```text
//! !!!ADV_ASSERT!!!
//! Assertion failed: x < 19
//! Explanation: x is too big
//! Location: src/main.rs:4
//! x = 23
//! some_double = 19.420000
//! ```
//!
//! If the list can't be parsed (an unknown type, an overlong annotation) the
//! raw list is printed instead of values. [`write_report`] renders the same
//! report into any `fmt::Write` without halting.
//!
//! # Configuration
//! [`Config::from_env`] reads `ADV_ASSERT_MAX_NAME_LEN`,
//! `ADV_ASSERT_MAX_TYPE_LEN`, `NO_COLOR` and `ADV_ASSERT_TRACE_EVENT`.
//! Each failed assertion is also emitted as a `tracing` error event;
//! [`init_tracing`] installs a stderr subscriber for them.
//!
//! # Features
//! With the `panic` feature a failed assertion panics instead of aborting. The
//! panic message is the full report, so the panic hook prints it and
//! `catch_unwind` callers can read it. Internal reporting errors panic as well.

mod env_utils;
mod errors;
mod init_tracing;
mod macros;
mod parser;
pub mod registry;
mod report;
mod value;

pub use errors::ParseError;
pub use init_tracing::init_tracing;
pub use parser::{parse, Limits, ParsedVariable, Parser, MAX_NAME_LEN, MAX_TYPE_LEN};
pub use report::{report_failure, write_report, AssertionSite, Config, Outcome};
pub use value::Value;
