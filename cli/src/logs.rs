//! Colored `key: value` lines for the `plasma` binary's stdout.

use colored::Color;

/// Formats `key: value`, coloring each half. `Colorize` must be in scope at the call site.
///
/// The key defaults to [`LogColor::Key`] and the value to [`LogColor::Value`]:
/// - `fmt_kv!("length", 18)`
/// - `fmt_kv!("  pool", address, LogColor::Account)`
/// - `fmt_kv!("action", action, LogColor::Action, LogColor::Name)`
#[macro_export]
macro_rules! fmt_kv {
    ($key:expr, $value:expr $(,)?) => {
        $crate::fmt_kv!($key, $value, $crate::logs::LogColor::Key)
    };
    ($key:expr, $value:expr, $key_color:expr $(,)?) => {
        $crate::fmt_kv!($key, $value, $key_color, $crate::logs::LogColor::Value)
    };
    ($key:expr, $value:expr, $key_color:expr, $value_color:expr $(,)?) => {{
        let __k = ::std::string::ToString::to_string(&$key);
        let __v = ::std::string::ToString::to_string(&$value);
        ::std::format!("{}: {}", __k.color($key_color), __v.color($value_color))
    }};
}

/// [`fmt_kv!`] followed by a newline on stdout.
#[macro_export]
macro_rules! print_kv {
    ($($args:expr),+ $(,)?) => {
        ::std::println!("{}", $crate::fmt_kv!($($args),+))
    };
}

/// What a piece of output is, rather than which color it gets.
#[derive(Clone, Copy, Debug)]
pub enum LogColor {
    Key,
    Value,
    /// An instruction's tag or the `action` label.
    Action,
    /// An instruction's name.
    Name,
    /// A role label in an account listing.
    Account,
    /// Encoded instruction data.
    Bytes,
    /// Accounts past the end of the template.
    Extra,
    Error,
}

const DIVIDER_WIDTH: usize = 80;

pub fn fmt_divider() -> String {
    "-".repeat(DIVIDER_WIDTH)
}

pub fn log_divider() {
    println!("{}", fmt_divider());
}

#[rustfmt::skip]
impl From<LogColor> for Color {
    fn from(value: LogColor) -> Color {
        match value {
            LogColor::Key     => Color::TrueColor { r: 255, g: 215, b: 87  },
            LogColor::Value   => Color::TrueColor { r: 95,  g: 95,  b: 95  },
            LogColor::Action  => Color::TrueColor { r: 0,   g: 255, b: 0   },
            LogColor::Name    => Color::TrueColor { r: 255, g: 215, b: 87  },
            LogColor::Account => Color::TrueColor { r: 0,   g: 95,  b: 255 },
            LogColor::Bytes   => Color::TrueColor { r: 192, g: 192, b: 192 },
            LogColor::Extra   => Color::TrueColor { r: 180, g: 105, b: 0   },
            LogColor::Error   => Color::TrueColor { r: 255, g: 0,   b: 45  },
        }
    }
}
