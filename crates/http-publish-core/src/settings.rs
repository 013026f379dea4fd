//! Configured destination list
//!
//! [`PublishSettings`] is the whole persisted state: an ordered list of
//! destinations. It is loaded once, mutated in memory through
//! [`add`](PublishSettings::add) and [`remove`](PublishSettings::remove), and
//! saved after every mutation by the caller. Records are never edited in place;
//! replacing one is remove-then-add.

use serde::{Deserialize, Serialize};

use crate::destination::DestinationSettings;
use crate::error::{Error, Result};

/// All configured destinations, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishSettings {
    #[serde(default)]
    destinations: Vec<DestinationSettings>,
}

/// Which path a publish action takes, based on how many destinations exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Nothing configured; the action fails and asks the user to add one
    None,
    /// Exactly one destination; dispatch immediately
    Single(String),
    /// Several destinations; the user picks one (default: the first)
    Multiple(Vec<String>),
}

impl PublishSettings {
    /// Create empty settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Build settings from records without validating them
    ///
    /// Used for state read back from storage, which is trusted as-is.
    pub fn from_destinations(destinations: Vec<DestinationSettings>) -> Self {
        Self { destinations }
    }

    pub fn destinations(&self) -> &[DestinationSettings] {
        &self.destinations
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Names of all destinations, in list order
    ///
    /// A record stored without a name contributes an empty string.
    pub fn names(&self) -> Vec<String> {
        self.destinations
            .iter()
            .map(|d| d.name().unwrap_or_default().to_string())
            .collect()
    }

    /// Append a destination
    ///
    /// # Errors
    ///
    /// - `Error::Validation`: the record fails [`DestinationSettings::validate`]
    /// - `Error::DuplicateDestination`: a destination with the same name exists
    pub fn add(&mut self, destination: DestinationSettings) -> Result<()> {
        destination.validate()?;

        let name = destination.name().unwrap_or_default();
        if self.destinations.iter().any(|d| d.name() == Some(name)) {
            return Err(Error::DuplicateDestination(name.to_string()));
        }

        tracing::debug!("Adding destination: {}", name);
        self.destinations.push(destination);
        Ok(())
    }

    /// Remove every destination called `name`
    ///
    /// Returns `true` if anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.destinations.len();
        self.destinations.retain(|d| d.name() != Some(name));
        let removed = self.destinations.len() != before;
        if removed {
            tracing::debug!("Removed destination: {}", name);
        }
        removed
    }

    /// Find a destination by exact name
    pub fn resolve(&self, name: &str) -> Result<&DestinationSettings> {
        resolve_destination(&self.destinations, name)
    }

    /// Decide how a publish action proceeds
    pub fn selection(&self) -> Selection {
        match self.destinations.as_slice() {
            [] => Selection::None,
            [only] => Selection::Single(only.name().unwrap_or_default().to_string()),
            _ => Selection::Multiple(self.names()),
        }
    }
}

/// First destination in list order whose name equals `name`
///
/// Exact, case-sensitive match. The found record is returned as stored; it is
/// not validated here.
pub fn resolve_destination<'a>(
    destinations: &'a [DestinationSettings],
    name: &str,
) -> Result<&'a DestinationSettings> {
    destinations
        .iter()
        .find(|d| d.name() == Some(name))
        .ok_or_else(|| Error::DestinationNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn dest(name: &str) -> DestinationSettings {
        DestinationSettings::new(Some(name), Some(&format!("http://example.org/{}", name)), None, None)
    }

    #[test]
    fn test_resolve() {
        let destinations = vec![dest("a"), dest("b")];

        let found = resolve_destination(&destinations, "b").unwrap();
        assert_eq!(found.url(), Some("http://example.org/b"));

        assert!(matches!(
            resolve_destination(&destinations, "c"),
            Err(Error::DestinationNotFound(ref n)) if n == "c"
        ));
        assert!(matches!(
            resolve_destination(&destinations, "B"),
            Err(Error::DestinationNotFound(_))
        ));
        assert!(matches!(
            resolve_destination(&[], "a"),
            Err(Error::DestinationNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_first_match_on_loaded_duplicates() {
        // Storage is trusted as-is, so duplicates can still arrive from disk
        let first = DestinationSettings::new(Some("a"), Some("http://first"), None, None);
        let second = DestinationSettings::new(Some("a"), Some("http://second"), None, None);
        let settings = PublishSettings::from_destinations(vec![first, second]);

        assert_eq!(settings.resolve("a").unwrap().url(), Some("http://first"));
    }

    #[test]
    fn test_add_validates() {
        let mut settings = PublishSettings::new();
        let invalid = DestinationSettings::new(Some("a"), Some("lala"), None, None);

        let err = settings.add(invalid).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::InvalidUrl { .. })));
        assert!(settings.is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate_names() {
        let mut settings = PublishSettings::new();
        settings.add(dest("a")).unwrap();

        let err = settings.add(dest("a")).unwrap_err();
        assert!(matches!(err, Error::DuplicateDestination(ref n) if n == "a"));
        assert_eq!(settings.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut settings = PublishSettings::new();
        settings.add(dest("a")).unwrap();
        settings.add(dest("b")).unwrap();

        assert!(settings.remove("a"));
        assert!(!settings.remove("a"));
        assert_eq!(settings.names(), vec!["b".to_string()]);
    }

    #[test]
    fn test_selection() {
        let mut settings = PublishSettings::new();
        assert_eq!(settings.selection(), Selection::None);

        settings.add(dest("a")).unwrap();
        assert_eq!(settings.selection(), Selection::Single("a".to_string()));

        settings.add(dest("b")).unwrap();
        assert_eq!(
            settings.selection(),
            Selection::Multiple(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_missing_destinations_key_defaults_to_empty() {
        let settings: PublishSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.is_empty());
    }
}
