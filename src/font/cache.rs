// src/font/cache.rs
// Per-font arena of front-face glyph meshes keyed by character
// RELEVANT FILES:src/font/mod.rs,src/glyph/builder.rs

use std::collections::HashMap;

use crate::geometry::MeshAttributes;
use crate::params::MeshParameters;

/// Shape parameters a cached front face was built with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CacheFingerprint {
    pub resolution: f32,
    pub bevel: f32,
    pub depth: f32,
}

impl CacheFingerprint {
    pub fn new(resolution: f32, bevel: f32, depth: f32) -> Self {
        Self {
            resolution,
            bevel,
            depth,
        }
    }

    pub fn from_params(params: &MeshParameters) -> Self {
        Self::new(params.resolution, params.bevel, params.depth)
    }
}

#[derive(Debug, Default)]
pub struct GlyphCache {
    meshes: Vec<MeshAttributes>,
    slots: HashMap<char, usize>,
    fingerprint: Option<CacheFingerprint>,
}

impl GlyphCache {
    pub fn get(&self, ch: char) -> Option<&MeshAttributes> {
        self.slots.get(&ch).map(|&slot| &self.meshes[slot])
    }

    /// Store or replace the mesh for `ch`.
    pub fn insert(&mut self, ch: char, mesh: MeshAttributes) {
        match self.slots.get(&ch) {
            Some(&slot) => self.meshes[slot] = mesh,
            None => {
                self.slots.insert(ch, self.meshes.len());
                self.meshes.push(mesh);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.meshes.clear();
        self.slots.clear();
        self.fingerprint = None;
    }

    /// Drop everything if the entries were built under other parameters.
    pub fn sync_fingerprint(&mut self, fingerprint: CacheFingerprint) {
        if self.fingerprint != Some(fingerprint) {
            if !self.is_empty() {
                log::debug!("Glyph cache invalidated ({} entries)", self.len());
            }
            self.clear();
            self.fingerprint = Some(fingerprint);
        }
    }
}
