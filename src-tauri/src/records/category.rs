use std::{collections::BTreeMap, fmt::Debug};

use serde::{
    de::{value::{Error as KeyError, StrDeserializer}, DeserializeOwned},
    Deserialize, Deserializer, Serialize,
};

/// Fixed partition of a widget's records, e.g. the four matrix quadrants.
pub trait Category:
    Copy + Ord + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const ALL: &'static [Self];
    /// Storage key for the per-category records.
    const RECORDS_KEY: &'static str;
    /// Storage key for the per-category draft inputs.
    const DRAFTS_KEY: &'static str;
}

/// One value per category, stored as a JSON object keyed by category name.
///
/// Documents written by older builds may lack a category; `normalized` and
/// the accessors treat a missing key as the empty value. Keys naming no known
/// category are dropped on load instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ByCategory<C: Category, V>(BTreeMap<C, V>);

impl<'de, C: Category, V: Deserialize<'de>> Deserialize<'de> for ByCategory<C, V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, V>::deserialize(deserializer)?;
        let mut known = BTreeMap::new();
        for (name, entry) in raw {
            match C::deserialize(StrDeserializer::<KeyError>::new(&name)) {
                Ok(category) => {
                    known.insert(category, entry);
                }
                Err(_) => log::warn!("Dropping unknown category '{name}'"),
            }
        }
        Ok(Self(known))
    }
}

impl<C: Category, V: Default> Default for ByCategory<C, V> {
    fn default() -> Self {
        Self(C::ALL.iter().map(|c| (*c, V::default())).collect())
    }
}

impl<C: Category, V: Default> ByCategory<C, V> {
    pub fn get(&self, category: C) -> Option<&V> {
        self.0.get(&category)
    }

    pub fn get_mut(&mut self, category: C) -> &mut V {
        self.0.entry(category).or_default()
    }

    pub fn set(&mut self, category: C, value: V) {
        self.0.insert(category, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (C, &V)> {
        self.0.iter().map(|(c, v)| (*c, v))
    }

    /// Fill in any category the stored document did not mention.
    pub fn normalized(mut self) -> Self {
        for category in C::ALL {
            self.0.entry(*category).or_default();
        }
        self
    }
}

impl<C: Category, T> ByCategory<C, Vec<T>> {
    pub fn records(&self, category: C) -> &[T] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl<C: Category> ByCategory<C, String> {
    pub fn draft(&self, category: C) -> &str {
        self.0.get(&category).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(crate) enum Shelf {
        Top,
        Bottom,
    }

    impl Category for Shelf {
        const ALL: &'static [Self] = &[Shelf::Top, Shelf::Bottom];
        const RECORDS_KEY: &'static str = "shelfItems";
        const DRAFTS_KEY: &'static str = "shelfInputs";
    }

    #[test]
    fn default_has_every_category() {
        let map: ByCategory<Shelf, Vec<u32>> = ByCategory::default();
        assert_eq!(map.iter().count(), 2);
        assert!(map.records(Shelf::Top).is_empty());
    }

    #[test]
    fn serializes_as_object_keyed_by_name() {
        let mut map: ByCategory<Shelf, String> = ByCategory::default();
        map.set(Shelf::Top, "half typed".into());

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({"top": "half typed", "bottom": ""}));
    }

    #[test]
    fn missing_categories_read_as_empty_and_normalize() {
        let map: ByCategory<Shelf, Vec<u32>> =
            serde_json::from_str(r#"{"top": [1, 2]}"#).unwrap();
        assert_eq!(map.records(Shelf::Top), &[1, 2]);
        assert!(map.records(Shelf::Bottom).is_empty());
        assert!(map.get(Shelf::Bottom).is_none());

        let map = map.normalized();
        assert_eq!(map.get(Shelf::Bottom), Some(&Vec::new()));
        assert_eq!(map.total(), 2);
    }

    #[test]
    fn unknown_categories_are_skipped_not_fatal() {
        let map: ByCategory<Shelf, Vec<u32>> =
            serde_json::from_str(r#"{"top": [7], "attic": [1, 2, 3]}"#).unwrap();

        assert_eq!(map.records(Shelf::Top), &[7]);
        assert_eq!(map.total(), 1);
    }

    #[test]
    fn wrong_value_shape_still_fails() {
        let parsed = serde_json::from_str::<ByCategory<Shelf, Vec<u32>>>(r#"{"top": "x"}"#);
        assert!(parsed.is_err());
    }
}
