//! Mesh assets: two-section text format, content-addressed registry, and
//! built-in fallback geometry.
//!
//! Meshes are identified by content-addressed hashes. The renderer consumes
//! registered meshes by id, never by raw file paths.
//!
//! # Invariants
//! - Parsing is all-or-nothing per file: malformed input yields an error with
//!   line/column context and no partial data.
//! - `parse(serialize(m, w)) == m` for every row width `w`, whenever both
//!   sections of `m` are non-empty.
//! - Registering identical payloads yields the same id and a single entry.

pub mod format;
pub mod library;

pub use format::{MeshData, MeshFormatError, POSITION_UV_FLOATS, parse, serialize};
pub use library::{ManifestEntry, MeshId, MeshLibrary, MeshLibraryError};

pub fn crate_info() -> &'static str {
    "walkspace-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("assets"));
    }
}
