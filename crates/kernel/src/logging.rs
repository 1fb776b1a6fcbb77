//! Logging Framework for the Kernel.
//!
//! Every record is written to the [console](crate::console), prefixed with the
//! uptime, the level and the module it came from. Debug records are only
//! emitted if the `logging` feature is enabled.

use core::{
    fmt::{self, Write},
    marker::PhantomData,
    time::Duration,
};
use owo_colors::{colors, Color, OwoColorize};

/// Represents any level of a log message.
pub trait Level {
    type Color: Color;

    const NAME: &'static str;

    /// Records of this level are dropped if this is `false`.
    const ENABLED: bool = true;
}

/// The debug log level.
pub enum Debug {}
impl Level for Debug {
    type Color = colors::Magenta;
    const NAME: &'static str = "Debug";
    const ENABLED: bool = cfg!(feature = "logging");
}

/// The info log level.
pub enum Info {}
impl Level for Info {
    type Color = colors::Cyan;
    const NAME: &'static str = "Info";
}

/// The warn log level.
pub enum Warn {}
impl Level for Warn {
    type Color = colors::Yellow;
    const NAME: &'static str = "Warn";
}

/// The error log level.
pub enum Error {}
impl Level for Error {
    type Color = colors::Red;
    const NAME: &'static str = "Error";
}

/// Log a debug message.
#[macro_export]
macro_rules! debug {
    (to = $out:expr; $($args:tt)+) => {
        $crate::log!(to = $out; Debug, $($args)+)
    };

    ($($args:tt)+) => {
        $crate::log!(Debug, $($args)+)
    };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    (to = $out:expr; $($args:tt)+) => {
        $crate::log!(to = $out; Info, $($args)+)
    };

    ($($args:tt)+) => {
        $crate::log!(Info, $($args)+)
    };
}

/// Log a warn message.
#[macro_export]
macro_rules! warn {
    (to = $out:expr; $($args:tt)+) => {
        $crate::log!(to = $out; Warn, $($args)+)
    };

    ($($args:tt)+) => {
        $crate::log!(Warn, $($args)+)
    };
}

/// Log an error message.
#[macro_export]
macro_rules! error {
    (to = $out:expr; $($args:tt)+) => {
        $crate::log!(to = $out; Error, $($args)+)
    };

    ($($args:tt)+) => {
        $crate::log!(Error, $($args)+)
    };
}

/// The standard logging macro.
///
/// Without an explicit `to = writer;` target, the record goes to the console.
#[macro_export]
macro_rules! log {
    (to = $out:expr; $level:ident, $($args:tt)+) => {{
        #[allow(unused_imports)]
        use ::owo_colors::OwoColorize;
        $crate::logging::_log::<$crate::logging::$level, _>(
            $out,
            ::core::module_path!(),
            ::core::format_args!($($args)+),
        )
    }};

    ($level:ident, $($args:tt)+) => {{
        let mut _console = $crate::console::get();
        $crate::log!(to = &mut _console; $level, $($args)+)
    }};
}

struct LogWriter<'fmt, L, W> {
    prefix: bool,
    time: Duration,
    module: &'fmt str,
    out: &'fmt mut W,
    _level: PhantomData<L>,
}

impl<L: Level, W: Write> LogWriter<'_, L, W> {
    fn print_prefix(&mut self) -> fmt::Result {
        let secs = self.time.as_secs();
        let millis = self.time.subsec_millis();
        write!(
            self.out,
            "{} {:>5} {} > ",
            format_args!("[{:>3}.{:<03}]", secs, millis).dimmed(),
            L::NAME.fg::<L::Color>(),
            self.module,
        )
    }
}

impl<L: Level, W: Write> fmt::Write for LogWriter<'_, L, W> {
    fn write_str(&mut self, mut s: &str) -> fmt::Result {
        while !s.is_empty() {
            if self.prefix {
                self.print_prefix()?;
                self.prefix = false;
            }

            match s.find('\n') {
                Some(newline) => {
                    let (line, rest) = s.split_at(newline + 1);
                    self.out.write_str(line)?;
                    self.prefix = true;
                    s = rest;
                }
                None => {
                    self.out.write_str(s)?;
                    break;
                }
            }
        }

        Ok(())
    }
}

#[doc(hidden)]
pub fn _log<L: Level, W: Write>(out: &mut W, module: &str, args: fmt::Arguments<'_>) {
    if !L::ENABLED {
        return;
    }

    let mut writer = LogWriter {
        time: crate::arch::time(),
        prefix: true,
        module,
        out,
        _level: PhantomData::<L>,
    };

    // a console that went away mid record has nowhere to report that
    let _ = writeln!(writer, "{}", args);
}

#[cfg(test)]
mod tests {
    #[test]
    fn record_has_level_and_module() {
        let mut out = String::new();
        crate::info!(to = &mut out; "probed {} extensions", 3);

        assert!(out.contains("Info"));
        assert!(out.contains("kernel::logging::tests"));
        assert!(out.ends_with("probed 3 extensions\n"));
    }

    #[test]
    fn every_line_gets_a_prefix() {
        let mut out = String::new();
        crate::warn!(to = &mut out; "first\nsecond\nthird");

        assert_eq!(out.lines().count(), 3);
        assert_eq!(out.matches("Warn").count(), 3);
        assert!(out.lines().all(|line| line.contains(" > ")));
    }

    #[test]
    fn debug_records_follow_the_feature() {
        let mut out = String::new();
        crate::debug!(to = &mut out; "hidden unless enabled");

        assert_eq!(out.is_empty(), !cfg!(feature = "logging"));
    }
}
