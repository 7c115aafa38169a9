use std::io::{self, BufRead, Write};
use tracing_subscriber::{EnvFilter, fmt};

#[macro_export]
macro_rules! dlog {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

/// Initialize colorful logging on stderr.
///
/// Default level is INFO.
/// - `-v` => DEBUG
/// - `-vv` => TRACE
/// - `-q` => WARN
/// - `-qq` => ERROR
///
/// `RUST_LOG` overrides everything (e.g. `RUST_LOG=trace`).
pub fn init_logging(verbose: u8, quiet: u8) {
    let level = level_name(verbose, quiet);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,mapty={level}")));

    let show_src = matches!(level, "debug" | "trace");

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(true)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_file(show_src)
        .with_line_number(show_src)
        .compact()
        .init();
}

fn level_name(verbose: u8, quiet: u8) -> &'static str {
    match i16::from(verbose) - i16::from(quiet) {
        i16::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        2..=i16::MAX => "trace",
    }
}

/// Ask a yes/no question; only an explicit "y" or "yes" counts as yes.
pub fn confirm(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn verbosity_flags_shift_the_level() {
        assert_eq!(level_name(0, 0), "info");
        assert_eq!(level_name(1, 0), "debug");
        assert_eq!(level_name(5, 0), "trace");
        assert_eq!(level_name(0, 1), "warn");
        assert_eq!(level_name(1, 3), "error");
    }

    #[test]
    fn confirm_needs_an_explicit_yes() {
        let mut out = Vec::new();
        assert!(confirm("Delete?", &mut Cursor::new("yes\n"), &mut out).unwrap());
        assert!(confirm("Delete?", &mut Cursor::new(" Y \n"), &mut out).unwrap());
        assert!(!confirm("Delete?", &mut Cursor::new("\n"), &mut out).unwrap());
        assert!(!confirm("Delete?", &mut Cursor::new(""), &mut out).unwrap());
        assert!(String::from_utf8(out).unwrap().starts_with("Delete? [y/N] "));
    }
}
