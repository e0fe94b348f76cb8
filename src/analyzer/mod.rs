//! Analysis engine for deriving versions from commits

pub mod version_calculator;

pub use version_calculator::{
    bump_for, calculate_current_version, VersionCalculator, VersionSteps,
};
