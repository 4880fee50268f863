//! Named character reference tables.

mod data;

use alloc::{collections::BTreeMap, string::String};

use data::ENTITIES;

/// No name in the built-in table is longer; longer candidates skip the search.
const MAX_NAME_LEN: usize = 32;

/// Resolves an entity name to its replacement text.
///
/// Names are canonical text (one `u32` per codepoint) without the leading
/// `&` and trailing `;`. Matching is exact and case-sensitive. Replacement
/// text is one or two codepoints for the built-in table, but any length is
/// accepted.
pub trait EntityLookup {
    /// Returns the replacement for `name`, or `None` if it is unknown.
    fn lookup(&self, name: &[u32]) -> Option<&str>;
}

impl<T: EntityLookup + ?Sized> EntityLookup for &T {
    fn lookup(&self, name: &[u32]) -> Option<&str> {
        (**self).lookup(name)
    }
}

impl EntityLookup for BTreeMap<String, String> {
    fn lookup(&self, name: &[u32]) -> Option<&str> {
        let key: String = name
            .iter()
            .map(|&cp| char::from_u32(cp))
            .collect::<Option<_>>()?;
        self.get(&key).map(String::as_str)
    }
}

/// The built-in table of 2,125 HTML named character references.
///
/// The table includes one entry with an empty name, mapped to U+2271. The
/// rewrite scan never looks up empty names, so that entry is reachable only
/// through [`EntityLookup::lookup`] and [`Html5Entities::get`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Html5Entities;

impl Html5Entities {
    /// Looks up a name given as a string.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static str> {
        ENTITIES
            .binary_search_by(|(key, _)| key.as_bytes().cmp(name.as_bytes()))
            .ok()
            .map(|idx| ENTITIES[idx].1)
    }

    /// Number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        ENTITIES.len()
    }

    /// Always `false`; present for symmetry with [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ENTITIES.is_empty()
    }

    /// Iterates `(name, replacement)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        ENTITIES.iter().copied()
    }
}

impl EntityLookup for Html5Entities {
    fn lookup(&self, name: &[u32]) -> Option<&str> {
        if name.len() > MAX_NAME_LEN {
            return None;
        }
        ENTITIES
            .binary_search_by(|(key, _)| key.bytes().map(u32::from).cmp(name.iter().copied()))
            .ok()
            .map(|idx| ENTITIES[idx].1)
    }
}
