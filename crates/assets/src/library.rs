use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::format::{self, MeshData, MeshFormatError};

/// Content-addressed mesh ID computed from the mesh payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshId(pub u64);

impl MeshId {
    /// Hashes the canonical little-endian encoding of the payload. Each
    /// section is length-prefixed so the boundary between them is unambiguous.
    pub fn of(data: &MeshData) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((data.vertices.len() as u64).to_le_bytes());
        for v in &data.vertices {
            hasher.update(v.to_le_bytes());
        }
        hasher.update((data.indices.len() as u64).to_le_bytes());
        for i in &data.indices {
            hasher.update(i.to_le_bytes());
        }
        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        Self(u64::from_le_bytes(bytes))
    }
}

impl std::fmt::Display for MeshId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Errors from mesh library operations.
#[derive(Debug, thiserror::Error)]
pub enum MeshLibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}: {source}", path.display())]
    Format {
        path: PathBuf,
        source: MeshFormatError,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row of the JSON manifest written by [`MeshLibrary::save_manifest`].
#[derive(Debug, Serialize)]
pub struct ManifestEntry {
    pub name: String,
    pub id: MeshId,
    pub vertex_floats: usize,
    pub index_count: usize,
}

/// Content-addressed mesh registry.
///
/// Meshes are indexed by their content hash; a name index maps resource names
/// (file stems) to ids. Registering identical payloads under different names
/// keeps a single entry with two aliases.
#[derive(Debug, Clone, Default)]
pub struct MeshLibrary {
    meshes: BTreeMap<MeshId, MeshData>,
    names: BTreeMap<String, MeshId>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register mesh data under a name and return its content id.
    pub fn register(&mut self, name: impl Into<String>, data: MeshData) -> MeshId {
        let id = MeshId::of(&data);
        self.meshes.entry(id).or_insert(data);
        self.names.insert(name.into(), id);
        id
    }

    pub fn get(&self, id: MeshId) -> Option<&MeshData> {
        self.meshes.get(&id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<(MeshId, &MeshData)> {
        let id = *self.names.get(name)?;
        Some((id, self.meshes.get(&id)?))
    }

    /// Number of distinct mesh payloads.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Iterate (name, id) pairs in name order.
    pub fn names(&self) -> impl Iterator<Item = (&str, MeshId)> {
        self.names.iter().map(|(n, id)| (n.as_str(), *id))
    }

    /// Iterate (id, data) pairs in id order.
    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &MeshData)> {
        self.meshes.iter().map(|(id, data)| (*id, data))
    }

    /// Parse one mesh file and register it under its file stem.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<MeshId, MeshLibraryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let data = format::parse(&text).map_err(|source| MeshLibraryError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
        let id = self.register(&name, data);
        tracing::debug!("registered mesh '{name}' as {id}");
        Ok(id)
    }

    /// Load every `.mesh` file in a directory in name order. Fails on the
    /// first unreadable or malformed file, registering nothing from it.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<Vec<MeshId>, MeshLibraryError> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "mesh"))
            .collect();
        paths.sort();
        let mut ids = Vec::new();
        for path in &paths {
            ids.push(self.load_file(path)?);
        }
        tracing::info!("loaded {} mesh file(s)", ids.len());
        Ok(ids)
    }

    /// Save a JSON summary of the registry (name, id, counts) for inspection.
    pub fn save_manifest(&self, path: impl AsRef<Path>) -> Result<(), MeshLibraryError> {
        let entries: Vec<ManifestEntry> = self
            .names
            .iter()
            .filter_map(|(name, id)| {
                self.meshes.get(id).map(|data| ManifestEntry {
                    name: name.clone(),
                    id: *id,
                    vertex_floats: data.vertices.len(),
                    index_count: data.indices.len(),
                })
            })
            .collect();
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &entries)?;
        Ok(())
    }
}
