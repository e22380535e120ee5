//! Filter state for one browsing session and its transitions.
//!
//! Every transition returns a new [`FilterState`]. A transition whose requested
//! value equals the current one is a no-op and returns the state unchanged;
//! any other facet change resets `page` to 1 while `page_size` is kept.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog_const::{
    DEFAULT_CATEGORY_ID, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, default_product_type, is_selectable_category,
};
use crate::facet_values::{CategoryId, GroupId, PriceRange, SortColumn, SortDirection};
use crate::url_codec::is_encodable_value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    pub category: CategoryId,
    pub product_types: BTreeSet<String>,
    pub groups: BTreeSet<GroupId>,
    pub price_range: PriceRange,
    pub rarities: BTreeSet<String>,
    pub search_term: String,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    pub page: u32,
    pub page_size: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::for_category(DEFAULT_CATEGORY_ID)
    }
}

/// One user-driven change to the filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterTransition {
    SetCategory(CategoryId),
    SetGroups(BTreeSet<GroupId>),
    SetProductTypes(BTreeSet<String>),
    SetPriceRange(PriceRange),
    SetRarities(BTreeSet<String>),
    SetSearchTerm(String),
    SetSort(SortColumn),
    SetPage(u32),
    SetPageSize(u32),
}

impl FilterState {
    /// Default state scoped to `category`.
    pub fn for_category(category: CategoryId) -> Self {
        Self {
            category,
            product_types: default_product_types(category),
            groups: BTreeSet::new(),
            price_range: PriceRange::Any,
            rarities: BTreeSet::new(),
            search_term: String::new(),
            sort_column: SortColumn::default(),
            sort_direction: SortDirection::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn apply(&self, transition: FilterTransition) -> Self {
        match transition {
            FilterTransition::SetCategory(c) => self.set_category(c),
            FilterTransition::SetGroups(g) => self.set_groups(g),
            FilterTransition::SetProductTypes(t) => self.set_product_types(t),
            FilterTransition::SetPriceRange(r) => self.set_price_range(r),
            FilterTransition::SetRarities(r) => self.set_rarities(r),
            FilterTransition::SetSearchTerm(s) => self.set_search_term(&s),
            FilterTransition::SetSort(c) => self.set_sort(c),
            FilterTransition::SetPage(p) => self.set_page(p),
            FilterTransition::SetPageSize(n) => self.set_page_size(n),
        }
    }

    /// Switches category, narrowing the product types to the first type the
    /// category offers and clearing set and rarity selections.
    pub fn set_category(&self, category: CategoryId) -> Self {
        if category == self.category || !is_selectable_category(category) {
            return self.clone();
        }
        Self {
            category,
            product_types: default_product_types(category),
            groups: BTreeSet::new(),
            rarities: BTreeSet::new(),
            page: 1,
            ..self.clone()
        }
    }

    pub fn set_groups(&self, groups: BTreeSet<GroupId>) -> Self {
        if groups == self.groups {
            return self.clone();
        }
        Self { groups, page: 1, ..self.clone() }
    }

    pub fn set_product_types(&self, product_types: BTreeSet<String>) -> Self {
        let product_types = clean_values(product_types);
        if product_types == self.product_types {
            return self.clone();
        }
        Self { product_types, page: 1, ..self.clone() }
    }

    pub fn set_price_range(&self, price_range: PriceRange) -> Self {
        if price_range == self.price_range {
            return self.clone();
        }
        Self { price_range, page: 1, ..self.clone() }
    }

    pub fn set_rarities(&self, rarities: BTreeSet<String>) -> Self {
        let rarities = clean_values(rarities);
        if rarities == self.rarities {
            return self.clone();
        }
        Self { rarities, page: 1, ..self.clone() }
    }

    pub fn set_search_term(&self, search_term: &str) -> Self {
        let search_term = search_term.trim();
        if search_term == self.search_term {
            return self.clone();
        }
        Self { search_term: search_term.to_string(), page: 1, ..self.clone() }
    }

    /// Re-selecting the active column flips direction; a new column starts ascending.
    pub fn set_sort(&self, column: SortColumn) -> Self {
        let sort_direction = if column == self.sort_column { self.sort_direction.flipped() } else { SortDirection::Asc };
        Self { sort_column: column, sort_direction, page: 1, ..self.clone() }
    }

    /// Only moves the page cursor. Callers clamp against the last known total.
    pub fn set_page(&self, page: u32) -> Self {
        Self { page: page.max(1), ..self.clone() }
    }

    pub fn set_page_size(&self, page_size: u32) -> Self {
        let page_size = normalize_page_size(page_size);
        if page_size == self.page_size {
            return self.clone();
        }
        Self { page_size, page: 1, ..self.clone() }
    }

    /// Clamps `page` into `[1, max(1, total_pages)]`.
    pub fn clamp_page(&self, total_pages: u32) -> Self {
        self.set_page(self.page.min(total_pages.max(1)))
    }
}

pub fn default_product_types(category: CategoryId) -> BTreeSet<String> {
    default_product_type(category).into_iter().collect()
}

pub fn normalize_page_size(page_size: u32) -> u32 {
    if PAGE_SIZE_OPTIONS.contains(&page_size) { page_size } else { DEFAULT_PAGE_SIZE }
}

/// Trims values and drops those the URL list form cannot carry.
fn clean_values(values: BTreeSet<String>) -> BTreeSet<String> {
    values.into_iter().map(|v| v.trim().to_string()).filter(|v| is_encodable_value(v)).collect()
}
