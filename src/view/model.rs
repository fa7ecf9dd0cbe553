//! View model for the content grid.

use crate::content::{ContentBundle, ContentItem, TypeFilter};

/// One rendered content card
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub item: ContentItem,
    pub visible: bool,
}

/// Cards rendered from a bundle, with client-side filter state
///
/// Filtering only flips `visible`; it never refetches and never touches the
/// cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedView {
    cards: Vec<Card>,
    filter: TypeFilter,
}

impl RenderedView {
    /// Render a bundle; `None` or an empty bundle renders the empty state
    pub fn render(bundle: Option<&ContentBundle>, filter: TypeFilter) -> Self {
        let cards = bundle
            .map(|b| {
                b.contents
                    .iter()
                    .map(|item| Card {
                        item: item.clone(),
                        visible: filter.matches(item.kind),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { cards, filter }
    }

    /// Re-apply visibility for a new filter
    pub fn apply_filter(&mut self, filter: TypeFilter) {
        self.filter = filter;
        for card in &mut self.cards {
            card.visible = filter.matches(card.item.kind);
        }
    }

    pub fn filter(&self) -> TypeFilter {
        self.filter
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Items visible under the active filter, in render order
    pub fn visible(&self) -> impl Iterator<Item = &ContentItem> {
        self.cards.iter().filter(|c| c.visible).map(|c| &c.item)
    }

    pub fn visible_count(&self) -> usize {
        self.cards.iter().filter(|c| c.visible).count()
    }

    /// Number of rendered cards, visible or not
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Show the empty state: nothing rendered, or nothing passes the filter
    pub fn is_empty_state(&self) -> bool {
        self.visible_count() == 0
    }
}
