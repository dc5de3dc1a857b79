// Copyright 2024-2025 Irreducible Inc.

use std::fmt::{self, Write};

use cfg_if::cfg_if;

use crate::{
    env_utils::{get_bool_env_var, get_env_var},
    errors::{err_msg, ParseError},
    parser::{Limits, Parser, MAX_NAME_LEN, MAX_TYPE_LEN},
    value::Value,
};

/// Report config.
#[derive(Debug, Clone)]
pub struct Config {
    /// Buffer sizes for names and type annotations, terminator included.
    /// Correspond to the `ADV_ASSERT_MAX_NAME_LEN` and `ADV_ASSERT_MAX_TYPE_LEN`
    /// environment variables.
    pub limits: Limits,

    /// Whether to disable color output.
    /// Corresponds to the `NO_COLOR` environment variable.
    pub no_color: bool,

    /// Whether to also emit a `tracing` error event for each failed assertion.
    /// Corresponds to the `ADV_ASSERT_TRACE_EVENT` environment variable.
    pub trace_event: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            limits: Limits {
                max_name_len: get_env_var("ADV_ASSERT_MAX_NAME_LEN", MAX_NAME_LEN),
                max_type_len: get_env_var("ADV_ASSERT_MAX_TYPE_LEN", MAX_TYPE_LEN),
            },
            no_color: get_bool_env_var("NO_COLOR", false),
            trace_event: get_bool_env_var("ADV_ASSERT_TRACE_EVENT", true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Everything the call site knows about a failed assertion.
#[derive(Debug, Clone, Copy)]
pub struct AssertionSite<'a> {
    pub condition: &'a str,
    pub explanation: &'a str,
    pub file: &'a str,
    pub line: u32,
    /// Source text of the variable list, e.g. `(int) x, (double) y`.
    pub spec: &'a str,
}

/// What a report ended up containing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// One line per parsed variable.
    Reported,
    /// No variables were declared.
    NoVariables,
    /// The variable list was printed verbatim, no value was read.
    ParseFailed(ParseError),
}

const BANNER: &str = "!!!ADV_ASSERT!!!";

fn write_header<W: Write>(out: &mut W, site: &AssertionSite<'_>, config: &Config) -> fmt::Result {
    if config.no_color {
        writeln!(out, "{BANNER}")?;
    } else {
        writeln!(out, "\x1b[1;31m{BANNER}\x1b[0m")?;
    }
    writeln!(out, "Assertion failed: {}", site.condition)?;
    writeln!(out, "Explanation: {}", site.explanation)?;
    writeln!(out, "Location: {}:{}", site.file, site.line)
}

/// Renders the report for a failed assertion into `out`.
///
/// The header is always written. `values` are matched to the parsed
/// variables by position; nothing is read from it when no variables are
/// declared or the variable list fails to parse.
pub fn write_report<W: Write>(
    out: &mut W,
    site: &AssertionSite<'_>,
    declared_count: usize,
    values: &[Value],
    config: &Config,
) -> Result<Outcome, fmt::Error> {
    write_header(out, site, config)?;

    if declared_count == 0 {
        writeln!(out, "No variables to print.")?;
        return Ok(Outcome::NoVariables);
    }

    let parsed = match Parser::new(config.limits).parse(site.spec, declared_count) {
        Ok(parsed) => parsed,
        Err(err) => {
            writeln!(out, "Can't read variables, the variable list is malformed: {err}")?;
            writeln!(out, "Variables: {}", site.spec)?;
            return Ok(Outcome::ParseFailed(err));
        }
    };

    if values.len() != declared_count {
        writeln!(
            out,
            "note: {declared_count} variables declared but {} values supplied",
            values.len()
        )?;
    }

    for (variable, value) in parsed.iter().zip(values) {
        let descriptor = variable.type_index.descriptor();
        write!(out, "{} = ", variable.name)?;
        value.write_as(out, descriptor)?;
        if !value.kind().is_compatible_with(descriptor.kind) {
            write!(out, " (declared as `{}`)", descriptor.canonical_name)?;
        }
        writeln!(out)?;
    }

    if parsed.len() < declared_count {
        writeln!(
            out,
            "note: only {} of {declared_count} declared variables are named in `{}`",
            parsed.len(),
            site.spec
        )?;
    }

    Ok(Outcome::Reported)
}

/// Reports a failed assertion on stderr and halts the process.
///
/// This is what [`adv_assert!`](crate::adv_assert) expands to. The process is
/// aborted, or with the `panic` feature, the calling thread panics with the
/// report as its message.
#[cold]
#[inline(never)]
pub fn report_failure(site: &AssertionSite<'_>, declared_count: usize, values: &[Value]) -> ! {
    let config = Config::from_env();

    let span = tracing::debug_span!("adv_assert", file = site.file, line = site.line);
    let _scope = span.enter();

    if config.trace_event {
        tracing::error!(
            condition = site.condition,
            explanation = site.explanation,
            file = site.file,
            line = site.line,
            declared_count,
            "assertion failed"
        );
    }

    let mut report = String::new();
    match write_report(&mut report, site, declared_count, values, &config) {
        Ok(Outcome::ParseFailed(err)) => {
            tracing::warn!(%err, spec = site.spec, "variable list could not be parsed");
        }
        Ok(_) => {}
        Err(_) => err_msg!("failed to format the assertion report"),
    }

    terminate(report)
}

fn terminate(report: String) -> ! {
    cfg_if! {
        if #[cfg(feature = "panic")] {
            panic!("{report}");
        } else {
            use std::io::Write as _;

            if let Err(err) = std::io::stderr().lock().write_all(report.as_bytes()) {
                err_msg!("failed to write the assertion report: {err}");
            }
            std::process::abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use rayon::prelude::*;

    use super::*;

    fn config() -> Config {
        Config {
            limits: Limits::default(),
            no_color: true,
            trace_event: false,
        }
    }

    fn site(spec: &str) -> AssertionSite<'_> {
        AssertionSite {
            condition: "x < 19",
            explanation: "x is too big",
            file: "src/main.rs",
            line: 42,
            spec,
        }
    }

    fn render(spec: &str, declared_count: usize, values: &[Value]) -> (String, Outcome) {
        let mut out = String::new();
        let outcome = write_report(&mut out, &site(spec), declared_count, values, &config()).unwrap();
        (out, outcome)
    }

    fn body(report: &str) -> Vec<&str> {
        report.lines().skip(4).collect()
    }

    #[test]
    fn header_is_always_written() {
        for (spec, count) in [("(int) x", 1), ("(bogus) x", 1), ("", 0)] {
            let (out, _) = render(spec, count, &[Value::Int(1)]);
            let header: Vec<_> = out.lines().take(4).collect();
            assert_eq!(
                header,
                [
                    BANNER,
                    "Assertion failed: x < 19",
                    "Explanation: x is too big",
                    "Location: src/main.rs:42",
                ]
            );
        }
    }

    #[test]
    fn colored_banner() {
        let mut out = String::new();
        let config = Config {
            no_color: false,
            ..config()
        };
        write_report(&mut out, &site(""), 0, &[], &config).unwrap();
        assert!(out.starts_with("\x1b[1;31m!!!ADV_ASSERT!!!\x1b[0m\n"));
    }

    #[test]
    fn int_and_double() {
        let (out, outcome) = render("(int) x, (double) y", 2, &[Value::Int(5), Value::Double(2.5)]);
        assert_eq!(outcome, Outcome::Reported);
        assert_eq!(body(&out), ["x = 5", "y = 2.500000"]);
    }

    #[test]
    fn char_value() {
        let (out, _) = render("(char) c", 1, &[Value::Char('A')]);
        assert_eq!(body(&out), ["c = A"]);
    }

    #[test]
    fn pointer_value() {
        let x = 0u8;
        let (out, _) = render("(int * ) p", 1, &[Value::from(&x)]);
        let lines = body(&out);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("p = 0x"), "{}", lines[0]);
    }

    #[test]
    fn unknown_type_prints_raw_list() {
        let (out, outcome) = render("(unknowntype) z", 1, &[Value::Int(3)]);
        assert_eq!(
            outcome,
            Outcome::ParseFailed(ParseError::UnknownType("unknowntype".into()))
        );
        assert!(out.contains("(unknowntype) z"));
        assert!(!out.contains("z = "));
    }

    #[test]
    fn long_type_text_prints_raw_list() {
        let spec = format!("({}) z", "x".repeat(100));
        let (out, outcome) = render(&spec, 1, &[Value::Int(3)]);
        assert!(matches!(outcome, Outcome::ParseFailed(ParseError::TypeTextTooLong { .. })));
        assert!(out.contains(&spec));
        assert!(!out.contains(" = 3"));
    }

    #[test]
    fn zero_variables() {
        let (out, outcome) = render("(unknowntype) z", 0, &[]);
        assert_eq!(outcome, Outcome::NoVariables);
        assert_eq!(body(&out), ["No variables to print."]);
    }

    #[test]
    fn mismatched_value_is_flagged() {
        let (out, _) = render("(int) x, (float) f", 2, &[Value::Double(1.5), Value::Double(0.5)]);
        assert_eq!(
            body(&out),
            ["x = 1.500000 (declared as `int`)", "f = 0.500000"]
        );
    }

    #[test]
    fn value_count_mismatch_is_noted() {
        let (out, outcome) = render("(int) a, (int) b", 2, &[Value::Int(1)]);
        assert_eq!(outcome, Outcome::Reported);
        assert_eq!(
            body(&out),
            ["note: 2 variables declared but 1 values supplied", "a = 1"]
        );
    }

    #[test]
    fn short_list_is_noted() {
        let (out, _) = render("(int) a", 2, &[Value::Int(1), Value::Int(2)]);
        assert_eq!(
            body(&out),
            ["a = 1", "note: only 1 of 2 declared variables are named in `(int) a`"]
        );
    }

    #[test]
    fn truncated_name_is_printed_truncated() {
        let mut out = String::new();
        let config = Config {
            limits: Limits {
                max_name_len: 4,
                max_type_len: MAX_TYPE_LEN,
            },
            ..config()
        };
        write_report(
            &mut out,
            &site("(int) counter, (char) c"),
            2,
            &[Value::Int(10), Value::Char('z')],
            &config,
        )
        .unwrap();
        assert_eq!(body(&out), ["cou = 10", "c = z"]);
    }

    #[cfg(feature = "panic")]
    #[test]
    fn panic_carries_the_report() {
        let payload = std::panic::catch_unwind(|| {
            report_failure(&site("(int) x, (char) c"), 2, &[Value::Int(5), Value::Char('q')]);
        })
        .unwrap_err();

        let message = payload.downcast_ref::<String>().unwrap();
        assert!(message.contains("!!!ADV_ASSERT!!!"), "{message}");
        assert!(message.contains("Assertion failed: x < 19\n"), "{message}");
        assert!(message.contains("\nx = 5\nc = q\n"), "{message}");
    }

    #[test]
    fn concurrent_reports_are_independent() {
        let reports: Vec<_> = (0..64i32)
            .into_par_iter()
            .map(|i| {
                let spec = format!("(int) v{i}, (long int) w{i}");
                let (out, _) = render(&spec, 2, &[Value::Int(i), Value::LongInt(i64::from(i) * 10)]);
                (i, out)
            })
            .collect();

        for (i, out) in reports {
            assert_eq!(body(&out), [format!("v{i} = {i}"), format!("w{i} = {}", i * 10)]);
        }
    }
}
