//! Log-line templates for the four event shapes a reclamation run reports.
//! Kept in one place so the wording can change without touching the engine.

use crate::utils::size_readable;

pub fn target_not_found(label: &str) -> String {
    format!("{label}: cache not found, skipped")
}

pub fn directory_removed(name: &str, size: u64) -> String {
    format!("Removed {name} ({})", size_readable(size))
}

pub fn target_cleaned(label: &str, size: u64) -> String {
    format!("{label}: cleaned, {} reclaimed", size_readable(size))
}

pub fn all_cleaned(size: u64) -> String {
    format!("All done, {} reclaimed in total", size_readable(size))
}
