/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const CYAN: &str = "\x1b[36m";

/// Grey for done todos, green for active ones.
pub fn color_for_completed(completed: bool) -> &'static str {
    if completed { GREY } else { GREEN }
}

/// Wrap `value` in `color` … RESET, unless `NO_COLOR` is set.
pub fn paint(value: &str, color: &str) -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        return value.to_string();
    }
    format!("{color}{value}{RESET}")
}
