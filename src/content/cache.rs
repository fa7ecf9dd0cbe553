//! Content Cache
//!
//! Keyword → bundle mapping that is the single source of truth for
//! rendering. Keys are unique and iterate in insertion order. There is no
//! eviction: an entry for a keyword that is no longer tracked stays until
//! the next full reload replaces the whole map.

use super::types::{ContentBundle, ContentItem};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentCache {
    entries: Vec<(String, ContentBundle)>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundle for a keyword, if one has been fetched
    pub fn get(&self, keyword: &str) -> Option<&ContentBundle> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, bundle)| bundle)
    }

    /// Store a bundle, overwriting in place if the keyword is already cached
    ///
    /// Returns the previous bundle for the keyword.
    pub fn set(&mut self, keyword: impl Into<String>, bundle: ContentBundle) -> Option<ContentBundle> {
        let keyword = keyword.into();
        match self.entries.iter_mut().find(|(k, _)| *k == keyword) {
            Some((_, existing)) => Some(std::mem::replace(existing, bundle)),
            None => {
                self.entries.push((keyword, bundle));
                None
            }
        }
    }

    /// All entries in insertion order
    pub fn all(&self) -> impl Iterator<Item = (&str, &ContentBundle)> {
        self.entries.iter().map(|(k, b)| (k.as_str(), b))
    }

    /// Cached keywords in insertion order
    pub fn keywords(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Every item across all keywords: keys in insertion order, then items
    pub fn flatten(&self) -> Vec<&ContentItem> {
        self.entries
            .iter()
            .flat_map(|(_, bundle)| bundle.contents.iter())
            .collect()
    }

    /// Owned bundle of [`flatten`](Self::flatten), used for the "all" view
    pub fn flattened_bundle(&self) -> ContentBundle {
        ContentBundle::new(self.flatten().into_iter().cloned().collect())
    }

    /// Rebuild the cache from a full reload
    ///
    /// Duplicate keywords in `entries` keep the last bundle at the first
    /// position.
    pub fn replace_all(&mut self, entries: impl IntoIterator<Item = (String, ContentBundle)>) {
        self.entries.clear();
        for (keyword, bundle) in entries {
            self.set(keyword, bundle);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of items across all keywords
    pub fn total_items(&self) -> usize {
        self.entries.iter().map(|(_, b)| b.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentType;

    fn item(title: &str) -> ContentItem {
        ContentItem::new(ContentType::News, title, format!("https://example.com/{}", title))
    }

    #[test]
    fn test_flatten_keeps_key_then_item_order() {
        let x = item("x");
        let y = item("y");
        let z = item("z");

        let mut cache = ContentCache::new();
        cache.set("A", ContentBundle::new(vec![x.clone()]));
        cache.set("B", ContentBundle::new(vec![y.clone(), z.clone()]));

        let flat = cache.flatten();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat, vec![&x, &y, &z]);
        assert_eq!(cache.total_items(), 3);
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut cache = ContentCache::new();
        cache.set("A", ContentBundle::new(vec![item("a1")]));
        cache.set("B", ContentBundle::new(vec![item("b1")]));

        let previous = cache.set("A", ContentBundle::new(vec![item("a2")]));
        assert_eq!(previous.unwrap().contents[0].title, "a1");
        assert_eq!(cache.keywords(), vec!["A", "B"]);
        assert_eq!(cache.get("A").unwrap().contents[0].title, "a2");
    }

    #[test]
    fn test_replace_all_drops_stale_keys() {
        let mut cache = ContentCache::new();
        cache.set("OLD", ContentBundle::new(vec![item("o")]));

        cache.replace_all(vec![
            ("BTS".to_string(), ContentBundle::new(vec![item("b")])),
            ("IVE".to_string(), ContentBundle::default()),
        ]);

        assert!(cache.get("OLD").is_none());
        assert_eq!(cache.keywords(), vec!["BTS", "IVE"]);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_flattened_bundle_empty() {
        let cache = ContentCache::new();
        assert!(cache.is_empty());
        assert!(cache.flattened_bundle().is_empty());
    }
}
