use std::collections::HashSet;
use std::sync::Arc;

use super::Page;

/// An unordered set of pages with URL-based uniqueness
///
/// This is the posting-list type of the inverted index: each indexed token
/// maps to the `PageSet` of pages containing it. Because `Page` equality is
/// URL equality, inserting the same page twice (or two handles to the same
/// URL) leaves a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSet {
    pages: HashSet<Arc<Page>>,
}

impl PageSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page to the set
    ///
    /// Returns `true` if the page was not already present.
    pub fn insert(&mut self, page: Arc<Page>) -> bool {
        self.pages.insert(page)
    }

    /// Returns whether the set contains a page with the same URL
    pub fn contains(&self, page: &Page) -> bool {
        self.pages.contains(page)
    }

    /// Returns the number of pages in the set
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterates over the pages in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Page>> {
        self.pages.iter()
    }

    /// Returns a new set containing the pages present in both sets
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use funnelweb::index::{Page, PageSet};
    ///
    /// let a = Arc::new(Page::new("https://example.com/a"));
    /// let b = Arc::new(Page::new("https://example.com/b"));
    ///
    /// let mut left = PageSet::new();
    /// left.insert(a.clone());
    /// left.insert(b.clone());
    ///
    /// let mut right = PageSet::new();
    /// right.insert(b.clone());
    ///
    /// let both = left.intersect(&right);
    /// assert_eq!(both.len(), 1);
    /// assert!(both.contains(&b));
    /// ```
    pub fn intersect(&self, other: &PageSet) -> PageSet {
        self.pages
            .iter()
            .filter(|page| other.contains(page))
            .cloned()
            .collect()
    }
}

impl FromIterator<Arc<Page>> for PageSet {
    fn from_iter<I: IntoIterator<Item = Arc<Page>>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PageSet {
    type Item = &'a Arc<Page>;
    type IntoIter = std::collections::hash_set::Iter<'a, Arc<Page>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
