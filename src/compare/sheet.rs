use serde::Serialize;

use crate::catalog::models::{DesignId, HouseDesign};

use super::set::ComparisonSet;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSheet {
    pub columns: Vec<SheetColumn>,
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SheetColumn {
    pub design_id: DesignId,
    pub name: String,
}

/// One attribute across every selected design; `values` follows `columns`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
    pub label: &'static str,
    pub values: Vec<String>,
    /// Whether the selected designs disagree on this attribute.
    pub differs: bool,
}

type Extractor = fn(&HouseDesign) -> String;

const ROWS: [(&str, Extractor); 7] = [
    ("Storeys", storeys),
    ("Bedrooms", |d| d.specs.bedrooms.to_string()),
    ("Bathrooms", |d| d.specs.bathrooms.clone()),
    ("Garage", |d| d.specs.garage_spaces.to_string()),
    ("Block width", |d| d.specs.block_width.clone()),
    ("Price", price),
    ("Category", |d| {
        d.category
            .as_ref()
            .map(|category| category.name.clone())
            .unwrap_or_default()
    }),
];

pub fn comparison_sheet(set: &ComparisonSet) -> ComparisonSheet {
    let columns = set
        .iter()
        .map(|design| SheetColumn {
            design_id: design.id,
            name: design.name.clone(),
        })
        .collect();

    let rows = ROWS
        .iter()
        .map(|&(label, extract)| {
            let values: Vec<String> = set.iter().map(extract).collect();
            let differs = values.windows(2).any(|pair| pair[0] != pair[1]);
            SheetRow {
                label,
                values,
                differs,
            }
        })
        .collect();

    ComparisonSheet { columns, rows }
}

fn storeys(design: &HouseDesign) -> String {
    if design.specs.storeys_label.is_empty() {
        design.specs.storeys.clone()
    } else {
        design.specs.storeys_label.clone()
    }
}

fn price(design: &HouseDesign) -> String {
    if !design.pricing.display.is_empty() {
        return design.pricing.display.clone();
    }
    match design.base_price() {
        Some(price) => format!("${price}"),
        None => "Price on application".to_string(),
    }
}
