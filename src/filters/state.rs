use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One independently toggleable facet of the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    Storeys,
    Bedrooms,
    Bathrooms,
    #[serde(alias = "max_price")]
    MaxPrice,
    Category,
}

impl FilterKey {
    pub const ALL: [FilterKey; 5] = [
        FilterKey::Storeys,
        FilterKey::Bedrooms,
        FilterKey::Bathrooms,
        FilterKey::MaxPrice,
        FilterKey::Category,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Storeys => "storeys",
            FilterKey::Bedrooms => "bedrooms",
            FilterKey::Bathrooms => "bathrooms",
            FilterKey::MaxPrice => "maxPrice",
            FilterKey::Category => "category",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active filter values, at most one per key. A missing key means the
/// dimension is unconstrained. Values are stored verbatim and never
/// validated here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct FilterSelection {
    values: BTreeMap<FilterKey, String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `value` for `key`, or deselects it when it is already the
    /// active value. An empty value clears the key. Returns whether the key
    /// is active afterwards.
    pub fn toggle(&mut self, key: FilterKey, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.is_empty() || self.values.get(&key) == Some(&value) {
            self.values.remove(&key);
            false
        } else {
            self.values.insert(key, value);
            true
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn is_active(&self, key: FilterKey, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }
}

impl<V: Into<String>> FromIterator<(FilterKey, V)> for FilterSelection {
    fn from_iter<I: IntoIterator<Item = (FilterKey, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key, value.into()))
                .filter(|(_, value)| !value.is_empty())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_selects_then_deselects() {
        let mut selection = FilterSelection::new();
        assert!(selection.toggle(FilterKey::Storeys, "1"));
        assert_eq!(selection.get(FilterKey::Storeys), Some("1"));

        assert!(!selection.toggle(FilterKey::Storeys, "1"));
        assert!(selection.is_empty());
    }

    #[test]
    fn empty_value_clears_instead_of_selecting() {
        for key in FilterKey::ALL {
            let mut selection = FilterSelection::new();
            assert!(!selection.toggle(key, ""), "{key}");
            assert!(selection.is_empty(), "{key}");

            selection.toggle(key, "2");
            assert!(!selection.toggle(key, ""), "{key}");
            assert_eq!(selection.get(key), None, "{key}");
        }

        let collected: FilterSelection = [(FilterKey::MaxPrice, "")].into_iter().collect();
        assert!(collected.is_empty());
    }

    #[test]
    fn toggle_replaces_prior_value_for_same_key() {
        let mut selection = FilterSelection::new();
        selection.toggle(FilterKey::Bedrooms, "3");
        selection.toggle(FilterKey::Bedrooms, "4");

        assert_eq!(selection.len(), 1);
        assert!(selection.is_active(FilterKey::Bedrooms, "4"));
        assert!(!selection.is_active(FilterKey::Bedrooms, "3"));
    }

    #[test]
    fn toggle_is_its_own_inverse_over_existing_state() {
        let mut selection: FilterSelection =
            [(FilterKey::Storeys, "2"), (FilterKey::MaxPrice, "400000")]
                .into_iter()
                .collect();
        let before = selection.clone();

        selection.toggle(FilterKey::MaxPrice, "500000");
        selection.toggle(FilterKey::MaxPrice, "500000");
        // Replacing a value and toggling it off drops the key entirely.
        assert_ne!(selection, before);

        let mut selection = before.clone();
        selection.toggle(FilterKey::Bathrooms, "2");
        selection.toggle(FilterKey::Bathrooms, "2");
        assert_eq!(selection, before);

        let mut selection = before.clone();
        selection.toggle(FilterKey::Storeys, "2");
        selection.toggle(FilterKey::Storeys, "2");
        assert_eq!(selection, before);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut selection: FilterSelection = [(FilterKey::Bedrooms, "3")].into_iter().collect();
        selection.clear();
        assert!(selection.is_empty());
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn serializes_as_camel_case_object_and_accepts_max_price_alias() {
        let selection: FilterSelection = [(FilterKey::MaxPrice, "300000")].into_iter().collect();
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"{"maxPrice":"300000"}"#);

        let parsed: FilterSelection = serde_json::from_str(r#"{"max_price":"300000"}"#).unwrap();
        assert_eq!(parsed, selection);
    }
}
