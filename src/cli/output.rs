//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print failure status (red X) at the given nesting depth
pub fn failure(depth: usize, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}{} {}", indent(depth), "✗".red(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print container heading (bold) at the given nesting depth
pub fn heading(depth: usize, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}{}", indent(depth), msg.to_string().bold());
}

/// Print detail line (no color) at the given nesting depth
pub fn detail(depth: usize, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}{}", indent(depth), msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Two spaces per level below the first.
pub fn indent(depth: usize) -> String {
    "  ".repeat(depth.saturating_sub(1))
}
