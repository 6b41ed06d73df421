//! Element identifiers and the fragment registry
//!
//! Identifiers are minted densely from 0 on every assembly and written to
//! the rendered document as the reserved attribute. The registry maps
//! each identifier to the pristine fragment snapshot taken at assembly
//! time; it lives exactly as long as one assembled document and is
//! rebuilt, never patched, on re-assembly.

use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

/// The reserved attribute carrying element identifiers in rendered
/// documents. Written only by the assembler; stripped before any markup
/// is persisted or exported.
pub const ELEMENT_ID_ATTR: &str = "data-id";

/// A per-assembly element identifier. Dense from 0 in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    /// Wrap a raw identifier value.
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw identifier value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ElementId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u32> for ElementId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// One registered element: its identifier and the exact serialized
/// subtree captured at assembly time, annotated with its own identifier
/// only (descendants carry none in the snapshot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRecord {
    /// The identifier minted for the element.
    pub id: ElementId,
    /// The element's outer HTML as snapshotted before any injection.
    pub fragment: String,
}

/// Identifier-to-record map for one assembled document.
#[derive(Debug, Clone, Default)]
pub struct FragmentRegistry {
    records: IndexMap<ElementId, ElementRecord>,
}

impl FragmentRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record. Later inserts with the same identifier replace
    /// earlier ones; the assembler never produces duplicates.
    pub fn insert(&mut self, record: ElementRecord) {
        self.records.insert(record.id, record);
    }

    /// Exact lookup.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&ElementRecord> {
        self.records.get(&id)
    }

    /// Lookup from identifier text as it arrives off the wire. Text that
    /// does not parse as an identifier is a miss, never an error.
    #[must_use]
    pub fn resolve(&self, id_text: &str) -> Option<&ElementRecord> {
        let id: ElementId = id_text.parse().ok()?;
        self.get(id)
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in assembly (document) order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementRecord> {
        self.records.values()
    }
}
