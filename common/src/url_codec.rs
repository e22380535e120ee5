//! Flat query-string encoding of [`FilterState`].
//!
//! `encode` produces the canonical minimal form used in the address bar,
//! `encode_request` the full form sent to the read endpoint. `decode` accepts
//! either and never fails: anything it cannot interpret falls back to the
//! field's default.

use url::form_urlencoded;

use crate::catalog_const::{DEFAULT_CATEGORY_ID, DEFAULT_PAGE_SIZE, is_selectable_category};
use crate::facet_values::{GroupId, PriceRange, SortColumn, SortDirection};
use crate::filter_state::{FilterState, default_product_types, normalize_page_size};

pub const KEY_CATEGORY: &str = "category";
pub const KEY_GROUPS: &str = "groups";
pub const KEY_TYPE: &str = "type";
pub const KEY_PRICE: &str = "price";
pub const KEY_RARITY: &str = "rarity";
pub const KEY_SEARCH: &str = "q";
pub const KEY_SORT_BY: &str = "sort_by";
pub const KEY_SORT_DIR: &str = "sort_dir";
pub const KEY_LIMIT: &str = "limit";
pub const KEY_PAGE: &str = "page";

pub const LIST_DELIMITER: char = ',';

/// Canonical minimal query string: `category` always, every other key only
/// when it differs from its default.
pub fn encode(state: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair(KEY_CATEGORY, &state.category.to_string());
    if !state.groups.is_empty() {
        serializer.append_pair(KEY_GROUPS, &join_list(state.groups.iter()));
    }
    if state.product_types != default_product_types(state.category) {
        serializer.append_pair(KEY_TYPE, &join_list(state.product_types.iter()));
    }
    if state.price_range != PriceRange::Any {
        serializer.append_pair(KEY_PRICE, state.price_range.as_param());
    }
    if !state.rarities.is_empty() {
        serializer.append_pair(KEY_RARITY, &join_list(state.rarities.iter()));
    }
    if !state.search_term.is_empty() {
        serializer.append_pair(KEY_SEARCH, &state.search_term);
    }
    if state.sort_column != SortColumn::default() {
        serializer.append_pair(KEY_SORT_BY, state.sort_column.as_param());
    }
    if state.sort_direction != SortDirection::default() {
        serializer.append_pair(KEY_SORT_DIR, state.sort_direction.as_param());
    }
    if state.page_size != DEFAULT_PAGE_SIZE {
        serializer.append_pair(KEY_LIMIT, &state.page_size.to_string());
    }
    if state.page != 1 {
        serializer.append_pair(KEY_PAGE, &state.page.to_string());
    }
    serializer.finish()
}

/// Every key, defaults included, so the receiver's own defaults never apply.
pub fn encode_request(state: &FilterState) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(KEY_CATEGORY, &state.category.to_string())
        .append_pair(KEY_GROUPS, &join_list(state.groups.iter()))
        .append_pair(KEY_TYPE, &join_list(state.product_types.iter()))
        .append_pair(KEY_PRICE, state.price_range.as_param())
        .append_pair(KEY_RARITY, &join_list(state.rarities.iter()))
        .append_pair(KEY_SEARCH, &state.search_term)
        .append_pair(KEY_SORT_BY, state.sort_column.as_param())
        .append_pair(KEY_SORT_DIR, state.sort_direction.as_param())
        .append_pair(KEY_LIMIT, &state.page_size.to_string())
        .append_pair(KEY_PAGE, &state.page.to_string())
        .finish()
}

/// Decodes a query string (with or without the leading `?`).
pub fn decode(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let params = QueryParams::parse(query);

    let category = match params.get(KEY_CATEGORY).map(|v| v.trim().parse::<u32>()) {
        Some(Ok(id)) if is_selectable_category(id) => id,
        Some(_) => {
            tracing::debug!("url_codec: unknown category {:?}, using default", params.get(KEY_CATEGORY));
            DEFAULT_CATEGORY_ID
        }
        None => DEFAULT_CATEGORY_ID,
    };

    let product_types = match params.get(KEY_TYPE) {
        Some(raw) => split_list(raw).collect(),
        None => default_product_types(category),
    };

    let groups = params
        .get(KEY_GROUPS)
        .map(|raw| split_list(raw).filter_map(|g| g.parse::<GroupId>().ok()).collect())
        .unwrap_or_default();

    let rarities = params.get(KEY_RARITY).map(|raw| split_list(raw).collect()).unwrap_or_default();

    let page_size = params
        .get(KEY_LIMIT)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .map(normalize_page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let page = params.get(KEY_PAGE).and_then(|v| v.trim().parse::<u32>().ok()).unwrap_or(1).max(1);

    FilterState {
        category,
        product_types,
        groups,
        price_range: params.get(KEY_PRICE).map(PriceRange::from_param).unwrap_or_default(),
        rarities,
        search_term: params.get(KEY_SEARCH).map(|q| q.trim().to_string()).unwrap_or_default(),
        sort_column: params.get(KEY_SORT_BY).map(SortColumn::from_param_or_default).unwrap_or_default(),
        sort_direction: params.get(KEY_SORT_DIR).map(SortDirection::from_param).unwrap_or_default(),
        page,
        page_size,
    }
}

/// Re-encodes any query string into its canonical form.
pub fn canonicalize(query: &str) -> String {
    encode(&decode(query))
}

/// Parsed pairs; the first occurrence of a key wins.
struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    fn parse(query: &str) -> Self {
        let pairs = form_urlencoded::parse(query.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
        Self { pairs }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

fn join_list<T: ToString>(values: impl Iterator<Item = T>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(&LIST_DELIMITER.to_string())
}

fn split_list(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(LIST_DELIMITER).map(|v| v.trim()).filter(|v| !v.is_empty()).map(|v| v.to_string())
}

/// Values used by `BTreeSet`-backed facets must not contain the list delimiter.
pub fn is_encodable_value(value: &str) -> bool {
    !value.contains(LIST_DELIMITER) && value.trim() == value && !value.is_empty()
}
