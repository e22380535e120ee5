//! Static catalog constants: categories, product types, page sizes and the
//! top-tier rarity list.

use crate::facet_values::{CategoryId, CategoryOption, FacetValue};

pub const DEFAULT_CATEGORY_ID: CategoryId = 3;

pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

/// Number of placeholder rows served to callers without the trends entitlement.
pub const RESTRICTED_PREVIEW_SIZE: usize = 12;

/// Rarities always listed first, in this order, when present in a category.
pub const TOP_TIER_RARITIES: [&str; 6] = [
    "Common",
    "Uncommon",
    "Rare",
    "Illustration Rare",
    "Special Illustration Rare",
    "Ultra Rare",
];

const CATEGORY_TABLE: [(CategoryId, &str, Option<&str>, bool); 4] = [
    (3, "Pokémon", Some("/images/logos/categories/pkmn-logo.png"), false),
    (1, "Magic the Gathering", Some("/images/logos/categories/mtg-logo.png"), false),
    (68, "One Piece", Some("/images/logos/categories/one-piece-logo.svg"), false),
    (0, "More Coming Soon!", None, true),
];

const TYPE_TABLE: [(&str, &str); 2] = [("card", "Singles"), ("sealed", "Sealed Products")];

/// Categories in display order, including disabled placeholders.
pub fn list_categories() -> Vec<CategoryOption> {
    CATEGORY_TABLE
        .iter()
        .map(|(id, label, image_src, disabled)| CategoryOption {
            value: *id,
            label: label.to_string(),
            category_id: *id,
            image_src: image_src.map(|s| s.to_string()),
            disabled: *disabled,
        })
        .collect()
}

pub fn find_category(category_id: CategoryId) -> Option<CategoryOption> {
    list_categories().into_iter().find(|c| c.category_id == category_id)
}

/// A category the user may actually switch to.
pub fn is_selectable_category(category_id: CategoryId) -> bool {
    find_category(category_id).is_some_and(|c| !c.disabled)
}

/// Product sub-types for a category. Unknown or disabled categories have none.
pub fn list_types(category_id: CategoryId) -> Vec<FacetValue> {
    if !is_selectable_category(category_id) {
        return Vec::new();
    }
    TYPE_TABLE.iter().map(|(value, label)| FacetValue::text(*value, *label)).collect()
}

/// Every product type any category accepts.
pub fn all_product_types() -> Vec<String> {
    let mut types = Vec::new();
    for category in list_categories() {
        for value in list_types(category.category_id) {
            let value = value.value.to_string();
            if !types.contains(&value) {
                types.push(value);
            }
        }
    }
    types
}

pub fn default_product_type(category_id: CategoryId) -> Option<String> {
    list_types(category_id).into_iter().next().map(|v| v.value.to_string())
}
