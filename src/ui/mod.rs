//! User interface module - status and warning output.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_status, display_success,
    display_version_change,
};
