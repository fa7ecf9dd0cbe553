//! View state
//!
//! Which page is showing, which keyword is selected, and the type filter.

use crate::content::TypeFilter;
use std::fmt;

/// Top-level page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Keywords,
}

/// Which keyword the dashboard shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Keyword(String),
}

impl Selection {
    pub fn label(&self) -> &str {
        match self {
            Selection::All => "All",
            Selection::Keyword(keyword) => keyword,
        }
    }

    pub fn keyword(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Keyword(keyword) => Some(keyword),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current page, selection and type filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub page: Page,
    pub selection: Selection,
    pub filter: TypeFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ViewState::default();
        assert_eq!(state.page, Page::Dashboard);
        assert_eq!(state.selection, Selection::All);
        assert_eq!(state.filter, TypeFilter::All);
    }

    #[test]
    fn test_selection_label() {
        assert_eq!(Selection::All.label(), "All");
        assert_eq!(Selection::All.keyword(), None);

        let bts = Selection::Keyword("BTS".to_string());
        assert_eq!(bts.to_string(), "BTS");
        assert_eq!(bts.keyword(), Some("BTS"));
    }
}
