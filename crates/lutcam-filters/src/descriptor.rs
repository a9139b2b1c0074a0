//! Filter identity and metadata.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Stable identifier for a selectable filter.
///
/// Identifiers are derived from the filter's origin and name
/// (`builtin:<name>` / `user:<file-stem>`), so re-enumerating the
/// registry always yields the same id for the same filter and any
/// selection state held by id stays valid. The identity transform has
/// the fixed well-known id [`FilterId::normal`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FilterId(String);

impl FilterId {
    /// The fixed identifier of the "normal" (identity) filter.
    pub fn normal() -> Self {
        Self("normal".to_string())
    }

    /// Identifier for a built-in catalog entry.
    pub fn builtin(name: &str) -> Self {
        Self(format!("builtin:{name}"))
    }

    /// Identifier for a user-supplied filter file.
    pub fn user(stem: &str) -> Self {
        Self(format!("user:{stem}"))
    }

    /// Parses an id from its display form (CLI round-trip).
    pub fn parse(s: &str) -> Self {
        Self(s.to_string())
    }

    /// Whether this is the identity filter.
    pub fn is_normal(&self) -> bool {
        self.0 == "normal"
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Origin of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Shipped with the application; never removable.
    BuiltIn,
    /// Added by the user from storage; removable.
    User,
}

/// Identity and metadata for one selectable filter.
///
/// Both built-in and user filters share this shape; the UI layer only
/// needs the name, the swatch color, and the optional thumbnail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterDescriptor {
    /// Stable identifier.
    pub id: FilterId,
    /// Display name.
    pub name: String,
    /// Backing `.cube` file; `None` for the synthesized normal entry.
    pub path: Option<PathBuf>,
    /// Origin.
    pub kind: FilterKind,
    /// Display swatch color, linear RGB.
    pub swatch: [f32; 3],
    /// Optional bundled thumbnail resource name.
    pub thumbnail: Option<String>,
}

impl FilterDescriptor {
    /// The synthesized descriptor for the identity transform.
    ///
    /// It has no backing file and no cache entry; the pipeline skips
    /// the color stage entirely when it is selected.
    pub fn normal() -> Self {
        Self {
            id: FilterId::normal(),
            name: "normal".to_string(),
            path: None,
            kind: FilterKind::BuiltIn,
            swatch: GRAY_SWATCH,
            thumbnail: Some("normal_thumbnail".to_string()),
        }
    }
}

/// Default swatch for the built-in film looks.
pub(crate) const GRAY_SWATCH: [f32; 3] = [0.5, 0.5, 0.5];

/// One entry of the built-in catalog.
pub(crate) struct BuiltinSpec {
    pub name: &'static str,
    pub thumbnail: &'static str,
}

/// The built-in film looks, in display order.
///
/// Each entry maps to `<name>.cube` in the bundled filter directory.
/// This order is the published order regardless of parse completion
/// order; "normal" is not listed because it is synthesized, never
/// parsed.
pub(crate) const BUILTIN_CATALOG: &[BuiltinSpec] = &[
    BuiltinSpec { name: "mood", thumbnail: "mood_thumbnail" },
    BuiltinSpec { name: "film", thumbnail: "film_thumbnail" },
    BuiltinSpec { name: "daily1", thumbnail: "daily1_thumbnail" },
    BuiltinSpec { name: "daily2", thumbnail: "daily2_thumbnail" },
];
