//! Terminal output helpers.

mod messages;

pub use messages::{error, info, success, warning};

/// Apply the color decision to every owo-colors call that uses
/// `if_supports_color`.
pub fn init_colors(no_color: bool) {
    if no_color || !crate::logger::should_use_colors() {
        owo_colors::set_override(false);
    }
}
