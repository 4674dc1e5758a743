//! Derives the visible subset of the catalog from the active filters.
//!
//! Every active key must hold for a design to stay visible. Inactive keys
//! and empty values are skipped. Output keeps catalog order and borrows from the catalog.

use crate::catalog::models::HouseDesign;

use super::numeric::{parse_leading_float, parse_leading_int};
use super::state::{FilterKey, FilterSelection};

pub fn filter_designs<'a>(
    designs: &'a [HouseDesign],
    selection: &FilterSelection,
) -> Vec<&'a HouseDesign> {
    if selection.is_empty() {
        return designs.iter().collect();
    }

    let predicates: Vec<Predicate> = selection
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| Predicate::parse(key, value))
        .collect();

    designs
        .iter()
        .filter(|design| predicates.iter().all(|predicate| predicate.matches(design)))
        .collect()
}

pub fn matches(design: &HouseDesign, selection: &FilterSelection) -> bool {
    selection
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .all(|(key, value)| Predicate::parse(key, value).matches(design))
}

/// A filter value parsed once per recomputation. Unparseable numbers become
/// `None` and reject every design.
#[derive(Debug, Clone, PartialEq)]
enum Predicate<'s> {
    Storeys(&'s str),
    Bedrooms(Option<i64>),
    MinBathrooms(Option<f64>),
    MaxPrice(Option<f64>),
    Category(&'s str),
}

impl<'s> Predicate<'s> {
    fn parse(key: FilterKey, value: &'s str) -> Self {
        match key {
            FilterKey::Storeys => Predicate::Storeys(value),
            FilterKey::Bedrooms => Predicate::Bedrooms(parse_leading_int(value)),
            FilterKey::Bathrooms => Predicate::MinBathrooms(parse_leading_float(value)),
            FilterKey::MaxPrice => Predicate::MaxPrice(parse_leading_float(value)),
            FilterKey::Category => Predicate::Category(value),
        }
    }

    fn matches(&self, design: &HouseDesign) -> bool {
        match *self {
            Predicate::Storeys(storeys) => design.specs.storeys == storeys,
            Predicate::Bedrooms(bedrooms) => {
                bedrooms == Some(i64::from(design.specs.bedrooms))
            }
            Predicate::MinBathrooms(min) => {
                match (parse_leading_float(&design.specs.bathrooms), min) {
                    (Some(bathrooms), Some(min)) => bathrooms >= min,
                    _ => false,
                }
            }
            // Unknown price cannot be shown to be under the cap.
            Predicate::MaxPrice(max) => {
                match (design.base_price().and_then(parse_leading_float), max) {
                    (Some(price), Some(max)) => price <= max,
                    _ => false,
                }
            }
            Predicate::Category(slug) => design.category_slug() == Some(slug),
        }
    }
}
