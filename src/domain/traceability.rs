//! Mapping from requirement identifiers to the sections that state them.

use std::collections::HashMap;

use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::domain::section::Section;

/// Where a requirement was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    /// The owning section's numeric id, if it had one.
    pub section_id: Option<String>,
    /// The owning section's title.
    pub section_title: String,
    /// The requirement's source line.
    pub text: String,
}

/// A requirement identifier that appeared more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    /// The duplicated identifier.
    pub id: String,
    /// The entry that was overwritten.
    pub previous: TraceEntry,
    /// The entry that replaced it.
    pub replacement: TraceEntry,
}

/// Requirement id → section context, in first-seen id order.
///
/// When an id occurs more than once, the later occurrence wins and keeps the
/// earlier one's position. Every overwrite is recorded in
/// [`collisions`](Self::collisions).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceabilityIndex {
    entries: Vec<(String, TraceEntry)>,
    positions: HashMap<String, usize>,
    collisions: Vec<Collision>,
}

impl TraceabilityIndex {
    /// Builds the index from segmented sections.
    #[must_use]
    pub fn build(sections: &[Section]) -> Self {
        let mut index = Self::default();
        for section in sections {
            for requirement in &section.requirements {
                index.insert(
                    requirement.id.clone(),
                    TraceEntry {
                        section_id: section.id.clone(),
                        section_title: section.title.clone(),
                        text: requirement.text.clone(),
                    },
                );
            }
        }
        tracing::debug!(
            requirements = index.len(),
            collisions = index.collisions.len(),
            "built traceability index"
        );
        index
    }

    fn insert(&mut self, id: String, entry: TraceEntry) {
        if let Some(&position) = self.positions.get(&id) {
            let previous = std::mem::replace(&mut self.entries[position].1, entry.clone());
            tracing::warn!(
                %id,
                previous = %previous.section_title,
                replacement = %entry.section_title,
                "duplicate requirement id, keeping the later occurrence"
            );
            self.collisions.push(Collision {
                id,
                previous,
                replacement: entry,
            });
        } else {
            self.positions.insert(id.clone(), self.entries.len());
            self.entries.push((id, entry));
        }
    }

    /// Looks up a requirement by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TraceEntry> {
        self.positions.get(id).map(|&position| &self.entries[position].1)
    }

    /// Iterates over `(id, entry)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TraceEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// The number of distinct requirement ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no requirements were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overwrites that happened while building, in the order they occurred.
    #[must_use]
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }
}

impl Serialize for TraceabilityIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, entry) in &self.entries {
            map.serialize_entry(id, entry)?;
        }
        map.end()
    }
}
