//! Property filtering and pagination.
//!
//! # Responsibility
//! - Filter properties by roll-number substring and municipality id.
//! - Slice filtered results into pages with an explicit total count.
//!
//! # Invariants
//! - Source collection order is preserved; no implicit sort is applied.
//! - Filters compose with logical AND; absent or empty filters match all.
//! - Concatenating every page reproduces the filtered sequence exactly once.

use crate::model::municipality::{find_municipality, Municipality, UNKNOWN_MUNICIPALITY_NAME};
use crate::model::property::Property;
use crate::tax::calc::compute_tax;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Page size applied when callers omit one or pass zero.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Property list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// Case-insensitive roll-number substring.
    #[serde(default)]
    pub search_text: Option<String>,
    /// Exact municipality id match.
    #[serde(default)]
    pub municipality_id: Option<String>,
}

/// Requested page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number. `0` is treated as `1`.
    pub page_number: u32,
    /// Rows per page. `None` or `0` falls back to [`DEFAULT_PAGE_SIZE`].
    pub page_size: Option<u32>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: None,
        }
    }
}

impl PageRequest {
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number,
            page_size: Some(page_size),
        }
    }

    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }
}

/// One row of a property listing, joined with its municipality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyListItem {
    #[serde(flatten)]
    pub property: Property,
    /// Municipality display name, or `Unknown` when the id does not resolve.
    pub municipality_name: String,
    pub annual_tax: Decimal,
}

/// Bounded page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    /// Effective page number after normalization.
    pub page_number: u32,
    /// Effective page size after normalization.
    pub page_size: u32,
    /// Size of the filtered set across all pages.
    pub total_count: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
}

/// Normalizes an optional page size to a usable value.
pub fn normalize_page_size(page_size: Option<u32>) -> u32 {
    match page_size {
        Some(0) | None => DEFAULT_PAGE_SIZE,
        Some(value) => value,
    }
}

/// Normalizes a 1-based page number.
pub fn normalize_page_number(page_number: u32) -> u32 {
    page_number.max(1)
}

impl PropertyFilter {
    /// Returns whether a property satisfies every active predicate.
    pub fn matches(&self, property: &Property) -> bool {
        let search_ok = match active(self.search_text.as_deref()) {
            Some(needle) => property
                .roll_number
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        };
        let municipality_ok = match active(self.municipality_id.as_deref()) {
            Some(id) => property.municipality_id == id,
            None => true,
        };
        search_ok && municipality_ok
    }
}

fn active(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Returns matching properties in source order.
pub fn filter_properties<'a>(
    properties: &'a [Property],
    filter: &PropertyFilter,
) -> Vec<&'a Property> {
    properties
        .iter()
        .filter(|property| filter.matches(property))
        .collect()
}

/// Slices an already-filtered sequence into one page.
pub fn paginate<T: Clone>(items: &[T], page: &PageRequest) -> PagedResult<T> {
    let page_number = normalize_page_number(page.page_number);
    let page_size = normalize_page_size(page.page_size);
    let size = page_size as usize;
    let total_count = items.len();

    let start = (page_number as usize - 1).saturating_mul(size);
    let end = start.saturating_add(size).min(total_count);
    let page_items = if start < total_count {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    PagedResult {
        items: page_items,
        page_number,
        page_size,
        total_count,
        total_pages: total_count.div_ceil(size),
        has_next_page: end < total_count,
    }
}

/// Filters, paginates and joins properties with municipality data.
pub fn list_properties(
    properties: &[Property],
    municipalities: &[Municipality],
    filter: &PropertyFilter,
    page: &PageRequest,
) -> PagedResult<PropertyListItem> {
    let matched = filter_properties(properties, filter);
    let paged = paginate(&matched, page);

    PagedResult {
        items: paged
            .items
            .into_iter()
            .map(|property| to_list_item(property, municipalities))
            .collect(),
        page_number: paged.page_number,
        page_size: paged.page_size,
        total_count: paged.total_count,
        total_pages: paged.total_pages,
        has_next_page: paged.has_next_page,
    }
}

/// Finds one property by exact roll number.
pub fn find_property<'a>(properties: &'a [Property], roll_number: &str) -> Option<&'a Property> {
    properties
        .iter()
        .find(|property| property.roll_number == roll_number)
}

fn to_list_item(property: &Property, municipalities: &[Municipality]) -> PropertyListItem {
    let municipality = find_municipality(municipalities, property.municipality_id.as_str());
    PropertyListItem {
        property: property.clone(),
        municipality_name: municipality
            .map(|m| m.name.clone())
            .unwrap_or_else(|| UNKNOWN_MUNICIPALITY_NAME.to_string()),
        annual_tax: compute_tax(property, municipality).total_tax,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        find_property, list_properties, normalize_page_size, paginate, PageRequest,
        PropertyFilter, DEFAULT_PAGE_SIZE,
    };
    use crate::model::municipality::Municipality;
    use crate::model::property::Property;
    use rust_decimal::Decimal;

    fn properties(count: usize) -> Vec<Property> {
        (1..=count)
            .map(|index| Property {
                roll_number: format!("P{index:03}"),
                assessment_value: Decimal::from(100_000 + index as i64),
                municipality_id: if index % 2 == 0 { "M2" } else { "M1" }.to_string(),
            })
            .collect()
    }

    #[test]
    fn page_size_defaults_when_missing_or_zero() {
        assert_eq!(normalize_page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(normalize_page_size(Some(0)), DEFAULT_PAGE_SIZE);
        assert_eq!(normalize_page_size(Some(3)), 3);
    }

    #[test]
    fn exact_multiple_of_page_size_reports_no_next_page() {
        let items: Vec<u32> = (0..20).collect();
        let second = paginate(&items, &PageRequest::new(2, 10));
        assert_eq!(second.items.len(), 10);
        assert!(!second.has_next_page);
        assert_eq!(second.total_pages, 2);

        let first = paginate(&items, &PageRequest::new(1, 10));
        assert!(first.has_next_page);
    }

    #[test]
    fn page_zero_is_treated_as_first_page() {
        let items: Vec<u32> = (0..5).collect();
        let page = paginate(&items, &PageRequest::new(0, 2));
        assert_eq!(page.page_number, 1);
        assert_eq!(page.items, vec![0, 1]);
    }

    #[test]
    fn page_beyond_end_is_empty() {
        let items: Vec<u32> = (0..5).collect();
        let page = paginate(&items, &PageRequest::new(9, 2));
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 5);
        assert!(!page.has_next_page);
    }

    #[test]
    fn empty_filter_values_match_everything() {
        let all = properties(4);
        let filter = PropertyFilter {
            search_text: Some(String::new()),
            municipality_id: Some(String::new()),
        };
        let page = list_properties(&all, &[], &filter, &PageRequest::default());
        assert_eq!(page.total_count, 4);
    }

    #[test]
    fn search_is_case_insensitive_and_composes_with_municipality() {
        let all = properties(12);
        let filter = PropertyFilter {
            search_text: Some("p01".to_string()),
            municipality_id: Some("M2".to_string()),
        };
        let page = list_properties(&all, &[], &filter, &PageRequest::default());
        let rolls: Vec<&str> = page
            .items
            .iter()
            .map(|item| item.property.roll_number.as_str())
            .collect();
        assert_eq!(rolls, vec!["P010", "P012"]);
    }

    #[test]
    fn list_items_join_municipality_name_and_tax() {
        let all = properties(2);
        let municipalities = vec![Municipality {
            municipality_id: "M1".to_string(),
            name: "Springfield".to_string(),
            municipal_rate: Decimal::ONE,
            education_rate: Decimal::ONE,
        }];
        let page = list_properties(
            &all,
            &municipalities,
            &PropertyFilter::default(),
            &PageRequest::default(),
        );
        assert_eq!(page.items[0].municipality_name, "Springfield");
        assert_eq!(page.items[0].annual_tax, Decimal::from(2_000) + Decimal::new(2, 2));
        assert_eq!(page.items[1].municipality_name, "Unknown");
        assert!(page.items[1].annual_tax.is_zero());
    }

    #[test]
    fn find_property_is_exact_match() {
        let all = properties(3);
        assert!(find_property(&all, "P002").is_some());
        assert!(find_property(&all, "p002").is_none());
        assert!(find_property(&all, "P00").is_none());
    }
}
