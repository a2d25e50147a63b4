//! Infrastructure layer - File I/O and profiles

pub mod profile;
pub mod sources;

pub use profile::{Profile, TimeScale};
pub use sources::{read_definition_lines, read_tag_codes};
