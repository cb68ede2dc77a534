//! Console output: status lines, live probe output and the final report.

mod plain;
mod progress;

pub use plain::{
    print_error, print_info, print_report, print_success, print_warning, write_report, Icon,
    Palette,
};
pub use progress::ConsoleObserver;
