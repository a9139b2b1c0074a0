//! The filter registry: enumeration, cache, and managed storage.

use crate::descriptor::{FilterDescriptor, FilterId, FilterKind, BUILTIN_CATALOG, GRAY_SWATCH};
use crate::error::{FilterError, FiltersResult, StorageError};
use lutcam_lut::{cube, CubeLut};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Storage locations for the registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Directory holding the bundled built-in `.cube` files.
    pub builtin_dir: PathBuf,
    /// Managed directory for user-added `.cube` files.
    pub user_dir: PathBuf,
}

#[derive(Default)]
struct Inner {
    builtins: Vec<FilterDescriptor>,
    users: Vec<FilterDescriptor>,
    cache: HashMap<FilterId, Arc<CubeLut>>,
}

/// Owner of the known filters and their parsed payloads.
///
/// Construct one per process and share it via `Arc`; the frame pipeline
/// and the UI layer both hold references. The registry outlives camera
/// sessions: cached LUT data survives a camera switch.
pub struct FilterRegistry {
    config: RegistryConfig,
    inner: RwLock<Inner>,
}

impl FilterRegistry {
    /// Creates an empty registry over the given storage locations.
    ///
    /// Call [`load_built_ins`](Self::load_built_ins) and
    /// [`load_user_filters`](Self::load_user_filters) to populate it.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Parses the built-in catalog and publishes the filter list.
    ///
    /// Files parse concurrently; the rayon collect is the join barrier,
    /// and the result vector keeps catalog order regardless of which
    /// parse finished first. A single failed file is logged and left
    /// out without affecting the rest.
    pub fn load_built_ins(&self) {
        let loaded: Vec<(FilterDescriptor, CubeLut)> = BUILTIN_CATALOG
            .par_iter()
            .filter_map(|spec| {
                let path = self.config.builtin_dir.join(format!("{}.cube", spec.name));
                match cube::read(&path) {
                    Ok(lut) => {
                        debug!(name = spec.name, size = lut.size(), "built-in filter parsed");
                        let descriptor = FilterDescriptor {
                            id: FilterId::builtin(spec.name),
                            name: spec.name.to_string(),
                            path: Some(path),
                            kind: FilterKind::BuiltIn,
                            swatch: GRAY_SWATCH,
                            thumbnail: Some(spec.thumbnail.to_string()),
                        };
                        Some((descriptor, lut))
                    }
                    Err(err) => {
                        warn!(name = spec.name, %err, "failed to load built-in filter");
                        None
                    }
                }
            })
            .collect();

        let mut inner = self.inner.write().expect("registry lock poisoned");
        inner.builtins.clear();
        for (descriptor, lut) in loaded {
            inner.cache.insert(descriptor.id.clone(), Arc::new(lut));
            inner.builtins.push(descriptor);
        }
    }

    /// Scans managed storage and registers every user `.cube` file.
    ///
    /// Payloads parse eagerly so the cache is warm before any transform
    /// build. Files that fail to parse are logged and skipped. Entries
    /// are ordered by file name so repeated scans are deterministic.
    pub fn load_user_filters(&self) -> FiltersResult<()> {
        let dir = &self.config.user_dir;
        fs::create_dir_all(dir).map_err(|source| StorageError::Unavailable {
            path: dir.clone(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|source| StorageError::Unavailable {
                path: dir.clone(),
                source,
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "cube"))
            .collect();
        paths.sort();

        let mut guard = self.inner.write().expect("registry lock poisoned");
        let inner = &mut *guard;
        for descriptor in inner.users.drain(..) {
            inner.cache.remove(&descriptor.id);
        }
        for path in paths {
            match Self::register_user_file(inner, &path) {
                Ok(id) => debug!(%id, "user filter registered"),
                Err(err) => warn!(path = %path.display(), %err, "skipping user filter"),
            }
        }
        Ok(())
    }

    /// Copies a `.cube` file into managed storage and registers it.
    ///
    /// A same-named prior copy is overwritten and its cache entry
    /// replaced, matching the re-parse-replaces-wholesale contract.
    pub fn add_user_filter(&self, source: &Path) -> FiltersResult<FilterDescriptor> {
        if !source.is_file() {
            return Err(StorageError::NotFound(source.to_path_buf()).into());
        }
        let file_name = source
            .file_name()
            .ok_or_else(|| StorageError::NotFound(source.to_path_buf()))?;

        let dir = &self.config.user_dir;
        fs::create_dir_all(dir).map_err(|source| StorageError::Unavailable {
            path: dir.clone(),
            source,
        })?;

        let dest = dir.join(file_name);
        fs::copy(source, &dest).map_err(|e| StorageError::CopyFailed {
            src: source.to_path_buf(),
            source: e,
        })?;

        let mut inner = self.inner.write().expect("registry lock poisoned");
        match Self::register_user_file(&mut inner, &dest) {
            Ok(id) => {
                let descriptor = inner
                    .users
                    .iter()
                    .find(|d| d.id == id)
                    .cloned()
                    .expect("registered descriptor present");
                Ok(descriptor)
            }
            Err(err) => {
                // Don't leave an unparseable file in managed storage;
                // the next scan would just fail on it again.
                let _ = fs::remove_file(&dest);
                Err(err)
            }
        }
    }

    /// Removes a user filter: backing file, descriptor, cache entry.
    ///
    /// Returns `Ok(false)` without touching anything for built-in ids,
    /// the normal id, or unknown ids.
    pub fn remove_user_filter(&self, id: &FilterId) -> FiltersResult<bool> {
        let mut inner = self.inner.write().expect("registry lock poisoned");
        let Some(pos) = inner
            .users
            .iter()
            .position(|d| &d.id == id && d.kind == FilterKind::User)
        else {
            return Ok(false);
        };

        if let Some(path) = inner.users[pos].path.clone() {
            fs::remove_file(&path).map_err(|source| StorageError::DeleteFailed {
                path,
                source,
            })?;
        }
        let removed = inner.users.remove(pos);
        inner.cache.remove(&removed.id);
        debug!(id = %removed.id, "user filter removed");
        Ok(true)
    }

    /// All selectable filters in display order.
    ///
    /// The normal descriptor is synthesized and prepended unless an
    /// entry with the normal id is already present, so calling this
    /// repeatedly always yields exactly one "normal" entry first.
    pub fn all_filters(&self) -> Vec<FilterDescriptor> {
        let inner = self.inner.read().expect("registry lock poisoned");
        let mut out = Vec::with_capacity(1 + inner.builtins.len() + inner.users.len());
        let has_normal = inner
            .builtins
            .iter()
            .chain(inner.users.iter())
            .any(|d| d.id.is_normal());
        if !has_normal {
            out.push(FilterDescriptor::normal());
        }
        out.extend(inner.builtins.iter().cloned());
        out.extend(inner.users.iter().cloned());
        out
    }

    /// O(1) cache lookup of a filter's parsed payload.
    ///
    /// `None` means the filter was never parsed or has been removed -
    /// callers degrade to pass-through, they do not treat this as
    /// fatal.
    pub fn cube_data(&self, id: &FilterId) -> Option<Arc<CubeLut>> {
        let inner = self.inner.read().expect("registry lock poisoned");
        inner.cache.get(id).cloned()
    }

    /// Looks up a descriptor by id.
    pub fn descriptor(&self, id: &FilterId) -> Option<FilterDescriptor> {
        self.all_filters().into_iter().find(|d| &d.id == id)
    }

    fn register_user_file(inner: &mut Inner, path: &Path) -> FiltersResult<FilterId> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("filter")
            .to_string();
        let lut = cube::read(path).map_err(FilterError::Parse)?;
        let id = FilterId::user(&stem);

        let descriptor = FilterDescriptor {
            id: id.clone(),
            name: stem,
            path: Some(path.to_path_buf()),
            kind: FilterKind::User,
            swatch: GRAY_SWATCH,
            thumbnail: None,
        };
        inner.cache.insert(id.clone(), Arc::new(lut));
        // Overwrite of a same-named file replaces the prior descriptor.
        inner.users.retain(|d| d.id != id);
        inner.users.push(descriptor);
        Ok(id)
    }
}
