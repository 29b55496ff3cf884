// Holiday module
// Read-only snapshot of public holidays keyed by ISO date

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::utils::date::iso_key;

/// Public holidays for one run, keyed by `YYYY-MM-DD`.
///
/// Built once from the holiday source and then only read. Callers pass it by
/// reference into the grid computation; there is no global instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    entries: BTreeMap<String, String>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holiday name for an exact ISO key.
    pub fn name_for_key(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn name_for(&self, date: NaiveDate) -> Option<&str> {
        self.name_for_key(&iso_key(date))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.contains_key(&iso_key(date))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for HolidaySet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
