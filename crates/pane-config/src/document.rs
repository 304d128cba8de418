/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! A parsed document and read-only views that record which parts the
//! application looked at.
//!
//! Reading a value through an [`EntryRef`] marks that entry as used, and
//! querying a section through a [`SectionRef`] marks that section as used.
//! After the application has consumed its settings,
//! [`Document::unused_keys`] and [`Document::unused_sections`] report what it
//! never read, which usually points at a misspelled key.

use crate::error::{ConfigError, ConfigResult, Scope};
use crate::tree::{Entry, Group, NodeId, Section};
use crate::value::{self, Parseable};
use pane_source_map::LocatedText;
use std::cell::RefCell;
use std::collections::HashSet;

#[derive(Debug, Default)]
struct Usage {
    used: RefCell<HashSet<NodeId>>,
}

impl Usage {
    fn mark(&self, id: NodeId) {
        self.used.borrow_mut().insert(id);
    }

    fn contains(&self, id: NodeId) -> bool {
        self.used.borrow().contains(&id)
    }
}

/// A parsed configuration document.
///
/// The usage set uses interior mutability, so a document can be queried
/// through shared references but cannot be shared across threads.
#[derive(Debug)]
pub struct Document {
    root: Section,
    usage: Usage,
}

impl Document {
    pub fn new(root: Section) -> Self {
        Self {
            root,
            usage: Usage::default(),
        }
    }

    /// View of the root section. The root is always considered used.
    pub fn root(&self) -> SectionRef<'_> {
        SectionRef::new(&self.root, &self.usage)
    }

    /// The underlying tree, without usage tracking.
    pub fn tree(&self) -> &Section {
        &self.root
    }

    pub fn into_tree(self) -> Section {
        self.root
    }

    pub fn is_used(&self, id: NodeId) -> bool {
        id == self.root.id() || self.usage.contains(id)
    }

    /// Entries whose value was never read, in document order.
    ///
    /// Entries inside unused sections are not listed; the section is
    /// reported by [`Document::unused_sections`] instead.
    pub fn unused_keys(&self) -> Vec<&Entry> {
        let mut keys = Vec::new();
        self.collect_unused(&self.root, &mut keys, &mut Vec::new());
        keys
    }

    /// Outermost sections that were never queried, in document order.
    pub fn unused_sections(&self) -> Vec<&Section> {
        let mut sections = Vec::new();
        self.collect_unused(&self.root, &mut Vec::new(), &mut sections);
        sections
    }

    fn collect_unused<'a>(
        &self,
        section: &'a Section,
        keys: &mut Vec<&'a Entry>,
        sections: &mut Vec<&'a Section>,
    ) {
        keys.extend(section.entries().filter(|entry| !self.is_used(entry.id())));
        for subsection in section.subsections() {
            if self.is_used(subsection.id()) {
                self.collect_unused(subsection, keys, sections);
            } else {
                sections.push(subsection);
            }
        }
    }
}

/// A section view that records queries.
#[derive(Debug, Clone, Copy)]
pub struct SectionRef<'a> {
    section: &'a Section,
    usage: &'a Usage,
}

impl<'a> SectionRef<'a> {
    fn new(section: &'a Section, usage: &'a Usage) -> Self {
        usage.mark(section.id());
        Self { section, usage }
    }

    pub fn name(&self) -> &'a str {
        self.section.name()
    }

    pub fn offset(&self) -> usize {
        self.section.offset
    }

    /// The underlying section, without usage tracking.
    pub fn section(&self) -> &'a Section {
        self.section
    }

    pub fn subsection(&self, name: &str) -> Option<SectionRef<'a>> {
        self.section
            .subsection(name)
            .map(|section| SectionRef::new(section, self.usage))
    }

    pub fn subsections(self) -> impl Iterator<Item = SectionRef<'a>> + 'a {
        let usage = self.usage;
        self.section
            .subsections()
            .iter()
            .map(move |section| SectionRef::new(section, usage))
    }

    pub fn groups(self) -> impl Iterator<Item = GroupRef<'a>> + 'a {
        let usage = self.usage;
        self.section
            .groups()
            .iter()
            .map(move |group| GroupRef { group, usage })
    }

    /// Look up a key across all groups of this section.
    ///
    /// Fails with [`ConfigError::Duplicate`] if more than one group defines it.
    pub fn get(&self, key: &str) -> ConfigResult<Option<EntryRef<'a>>> {
        Ok(self
            .section
            .unique_key(key)?
            .map(|entry| EntryRef::new(entry, self.usage)))
    }

    /// Number of groups in this section that define `key`.
    pub fn count_keys(&self, key: &str) -> usize {
        self.section.count_keys(key)
    }

    pub fn require(&self, key: &str) -> ConfigResult<EntryRef<'a>> {
        self.get(key)?.ok_or_else(|| ConfigError::MissingKey {
            key: key.to_string(),
            offset: self.section.offset,
            scope: Scope::Section,
        })
    }

    /// Look up and convert an optional value.
    pub fn get_as<T: Parseable>(&self, key: &str) -> ConfigResult<Option<T>> {
        value::parse_optional(self.get(key)?)
    }

    /// Look up and convert a required value.
    pub fn require_as<T: Parseable>(&self, key: &str) -> ConfigResult<T> {
        value::parse(self.require(key)?)
    }
}

/// A group view. Groups are reached through a [`SectionRef`], which has
/// already recorded the section as used.
#[derive(Debug, Clone, Copy)]
pub struct GroupRef<'a> {
    group: &'a Group,
    usage: &'a Usage,
}

impl<'a> GroupRef<'a> {
    pub fn offset(&self) -> usize {
        self.group.offset
    }

    pub fn group(&self) -> &'a Group {
        self.group
    }

    pub fn len(&self) -> usize {
        self.group.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group.is_empty()
    }

    pub fn entries(self) -> impl Iterator<Item = EntryRef<'a>> + 'a {
        let usage = self.usage;
        self.group
            .entries()
            .iter()
            .map(move |entry| EntryRef::new(entry, usage))
    }

    pub fn get(&self, key: &str) -> ConfigResult<Option<EntryRef<'a>>> {
        Ok(self
            .group
            .unique_key(key)?
            .map(|entry| EntryRef::new(entry, self.usage)))
    }

    pub fn require(&self, key: &str) -> ConfigResult<EntryRef<'a>> {
        self.get(key)?.ok_or_else(|| ConfigError::MissingKey {
            key: key.to_string(),
            offset: self.group.offset,
            scope: Scope::Group,
        })
    }

    pub fn get_as<T: Parseable>(&self, key: &str) -> ConfigResult<Option<T>> {
        value::parse_optional(self.get(key)?)
    }

    pub fn require_as<T: Parseable>(&self, key: &str) -> ConfigResult<T> {
        value::parse(self.require(key)?)
    }
}

/// An entry view. Reading the value marks the entry as used; reading only the
/// key does not.
#[derive(Debug, Clone, Copy)]
pub struct EntryRef<'a> {
    entry: &'a Entry,
    usage: &'a Usage,
}

impl<'a> EntryRef<'a> {
    fn new(entry: &'a Entry, usage: &'a Usage) -> Self {
        Self { entry, usage }
    }

    pub fn key(&self) -> &'a LocatedText {
        &self.entry.key
    }

    pub fn value(&self) -> &'a LocatedText {
        self.usage.mark(self.entry.id());
        &self.entry.value
    }

    /// The underlying entry, without usage tracking.
    pub fn entry(&self) -> &'a Entry {
        self.entry
    }
}
