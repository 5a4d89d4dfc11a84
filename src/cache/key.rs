//! Cache Key Module
//!
//! Composite key `(subject, category, radius)` and its storage token.

use std::fmt;

use crate::error::KeyError;
use crate::models::Category;

// == Public Constants ==
/// Namespace prefix shared by every key this cache writes.
pub const KEY_NAMESPACE: &str = "amenity";

/// Separator between key components; never legal inside a subject id.
pub const KEY_SEPARATOR: char = ':';

/// Radius used when a caller does not pick one.
pub const DEFAULT_RADIUS_METERS: u32 = 5000;

// Glob metacharacters would turn a prefix scan into a wider match.
const RESERVED_CHARS: [char; 6] = [KEY_SEPARATOR, '*', '?', '[', ']', '\\'];

// == Subject Id ==
/// Identifier of the listing amenities are computed around.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectId(String);

impl SubjectId {
    /// Validates and wraps a subject identifier.
    ///
    /// Rejects empty ids, whitespace, the key separator and glob
    /// metacharacters.
    pub fn new(id: impl Into<String>) -> Result<Self, KeyError> {
        let id = id.into();
        if id.is_empty() {
            return Err(KeyError::EmptySubject);
        }
        if let Some(c) = id
            .chars()
            .find(|c| RESERVED_CHARS.contains(c) || c.is_whitespace())
        {
            return Err(KeyError::ReservedCharacter(c));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage prefix matching every key of this subject.
    pub fn key_prefix(&self) -> String {
        format!("{KEY_NAMESPACE}{KEY_SEPARATOR}{}{KEY_SEPARATOR}", self.0)
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Radius ==
/// Search radius in meters, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Radius(u32);

impl Radius {
    pub fn new(meters: u32) -> Result<Self, KeyError> {
        if meters == 0 {
            return Err(KeyError::ZeroRadius);
        }
        Ok(Self(meters))
    }

    pub fn meters(&self) -> u32 {
        self.0
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self(DEFAULT_RADIUS_METERS)
    }
}

// == Cache Key ==
/// Address of one cached amenity list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub subject: SubjectId,
    pub category: Category,
    pub radius: Radius,
}

impl CacheKey {
    pub fn new(subject: SubjectId, category: Category, radius: Radius) -> Self {
        Self {
            subject,
            category,
            radius,
        }
    }

    /// Storage token used in both tiers: `amenity:{subject}:{category}:{radius}`.
    pub fn storage_key(&self) -> String {
        format!(
            "{}{}{KEY_SEPARATOR}{}",
            self.subject.key_prefix(),
            self.category.as_str(),
            self.radius.meters()
        )
    }
}

/// Remote scan pattern covering every key in the namespace.
pub fn namespace_pattern() -> String {
    format!("{KEY_NAMESPACE}{KEY_SEPARATOR}*")
}
