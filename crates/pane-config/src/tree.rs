/*
 * tree.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The configuration tree: sections containing groups of key/value entries.
//!
//! A document is a root [`Section`] with an empty name. Each section holds an
//! ordered list of [`Group`]s (separated by `-` lines in the source) and an
//! ordered list of named subsections. Keys are unique within a group; a key
//! repeated across groups is only reported when a section-wide lookup asks
//! for it.
//!
//! The tree is immutable once parsed. Usage tracking lives in
//! [`crate::Document`], keyed by [`NodeId`].

use crate::error::{ConfigError, ConfigResult, Scope};
use pane_source_map::{LocatedText, Span};

/// Identity of an entry or section within one parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }
}

/// A single `key = value` entry.
#[derive(Debug, Clone)]
pub struct Entry {
    id: NodeId,
    pub key: LocatedText,
    pub value: LocatedText,
}

impl Entry {
    pub(crate) fn new(id: NodeId, key: LocatedText, value: LocatedText) -> Self {
        Self { id, key, value }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

/// Entries compare by key and value, including locations; identity is ignored.
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

/// An ordered run of entries with unique keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Offset of the `[` or `-` that opened the group (0 for the first root group).
    pub offset: usize,
    entries: Vec<Entry>,
}

impl Group {
    pub(crate) fn new(offset: usize) -> Self {
        Self {
            offset,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First entry with the given key.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.key.as_str() == key)
    }

    /// The entry with the given key, rejecting a key defined twice.
    pub fn unique_key(&self, key: &str) -> ConfigResult<Option<&Entry>> {
        unique(
            self.entries.iter().filter(|entry| entry.key.as_str() == key),
            Scope::Group,
        )
    }

    /// Append an entry, rejecting a key already present in this group.
    pub(crate) fn push(&mut self, entry: Entry) -> ConfigResult<()> {
        if let Some(first) = self.get(entry.key.as_str()) {
            return Err(ConfigError::Duplicate {
                first: Box::new(first.clone()),
                second: Box::new(entry),
                scope: Scope::Group,
            });
        }
        self.entries.push(entry);
        Ok(())
    }
}

fn unique<'a>(
    mut matches: impl Iterator<Item = &'a Entry>,
    scope: Scope,
) -> ConfigResult<Option<&'a Entry>> {
    let Some(first) = matches.next() else {
        return Ok(None);
    };
    match matches.next() {
        Some(second) => Err(ConfigError::Duplicate {
            first: Box::new(first.clone()),
            second: Box::new(second.clone()),
            scope,
        }),
        None => Ok(Some(first)),
    }
}

/// A named section. The root section has an empty name.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    id: NodeId,
    name: String,
    /// Offset of the section's name in its first header (0 for the root).
    pub offset: usize,
    /// Source length of that name, including any quotes and escapes.
    size: usize,
    groups: Vec<Group>,
    subsections: Vec<Section>,
}

impl Section {
    pub(crate) fn new(id: NodeId, name: impl Into<String>, offset: usize) -> Self {
        let name = name.into();
        Self {
            id,
            size: name.len(),
            name,
            offset,
            groups: vec![Group::new(offset)],
            subsections: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the name was written in the section's first header.
    pub fn name_span(&self) -> Span {
        Span::new(self.offset, self.size)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn subsections(&self) -> &[Section] {
        &self.subsections
    }

    pub fn subsection(&self, name: &str) -> Option<&Section> {
        self.subsections.iter().find(|section| section.name == name)
    }

    /// All entries of all groups, in document order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.groups.iter().flat_map(|group| group.entries.iter())
    }

    /// Number of groups defining `key`.
    pub fn count_keys(&self, key: &str) -> usize {
        self.groups
            .iter()
            .filter(|group| group.get(key).is_some())
            .count()
    }

    /// The entry with the given key across all groups, rejecting a key that
    /// appears in more than one group.
    pub fn unique_key(&self, key: &str) -> ConfigResult<Option<&Entry>> {
        unique(
            self.groups.iter().filter_map(|group| group.get(key)),
            Scope::Section,
        )
    }

    /// Compare names, keys, values and nesting, ignoring locations and identity.
    pub fn same_structure(&self, other: &Section) -> bool {
        self.name == other.name
            && self.groups.len() == other.groups.len()
            && self.groups.iter().zip(&other.groups).all(|(a, b)| {
                a.entries.len() == b.entries.len()
                    && a.entries.iter().zip(&b.entries).all(|(x, y)| {
                        x.key.as_str() == y.key.as_str() && x.value.as_str() == y.value.as_str()
                    })
            })
            && self.subsections.len() == other.subsections.len()
            && self
                .subsections
                .iter()
                .zip(&other.subsections)
                .all(|(a, b)| a.same_structure(b))
    }

    /// Start a new group at `offset`, replacing the current group if it is
    /// still empty.
    pub(crate) fn open_group(&mut self, offset: usize) {
        if self.groups.last().is_some_and(Group::is_empty) {
            self.groups.pop();
        }
        self.groups.push(Group::new(offset));
    }

    pub(crate) fn current_group_mut(&mut self) -> &mut Group {
        if self.groups.is_empty() {
            self.groups.push(Group::new(self.offset));
        }
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    pub(crate) fn subsection_index_or_insert(
        &mut self,
        name: &LocatedText,
        next_id: impl FnOnce() -> NodeId,
    ) -> usize {
        match self.subsections.iter().position(|s| s.name == name.as_str()) {
            Some(index) => index,
            None => {
                let mut section = Section::new(next_id(), name.as_str(), name.offset);
                section.size = name.size;
                self.subsections.push(section);
                self.subsections.len() - 1
            }
        }
    }

    pub(crate) fn subsection_at_mut(&mut self, index: usize) -> &mut Section {
        &mut self.subsections[index]
    }
}
