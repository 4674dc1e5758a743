use std::cmp::{Ordering, Reverse};

use serde::{Deserialize, Serialize};

use crate::catalog::models::HouseDesign;

use super::numeric::parse_leading_float;

/// Display ordering applied on top of the filtered view.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Catalog order as delivered by the CMS.
    #[default]
    Catalog,
    PriceLowToHigh,
    PriceHighToLow,
    NameAsc,
    NameDesc,
    BedroomsAsc,
    BedroomsDesc,
}

/// Stable sort. Designs without a readable base price go last in both
/// price orders.
pub fn sort_designs(designs: &mut [&HouseDesign], order: SortOrder) {
    match order {
        SortOrder::Catalog => {}
        SortOrder::PriceLowToHigh => {
            designs.sort_by(|a, b| compare_prices(price_of(a), price_of(b), false))
        }
        SortOrder::PriceHighToLow => {
            designs.sort_by(|a, b| compare_prices(price_of(a), price_of(b), true))
        }
        SortOrder::NameAsc => designs.sort_by_cached_key(|design| design.name.to_lowercase()),
        SortOrder::NameDesc => {
            designs.sort_by_cached_key(|design| Reverse(design.name.to_lowercase()))
        }
        SortOrder::BedroomsAsc => designs.sort_by_key(|design| design.specs.bedrooms),
        SortOrder::BedroomsDesc => {
            designs.sort_by(|a, b| b.specs.bedrooms.cmp(&a.specs.bedrooms))
        }
    }
}

fn price_of(design: &HouseDesign) -> Option<f64> {
    design.base_price().and_then(parse_leading_float)
}

fn compare_prices(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = a.total_cmp(&b);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
