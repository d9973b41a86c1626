//! Grouping of menu items into storefront sections.
//!
//! The storefront shows four fixed sections. Items are matched to a section by
//! exact, case-sensitive equality on their category label. Items whose label
//! matches no section are kept aside in [`MenuSections::unrecognized`] so that
//! callers can report them; they never appear in a section.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::MenuItem;

/// One of the fixed storefront sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryBucket {
    #[serde(rename = "FNF Special")]
    FnfSpecial,
    #[serde(rename = "Snacks Corner")]
    SnacksCorner,
    #[serde(rename = "Cafeteria")]
    Cafeteria,
    #[serde(rename = "Canteen")]
    Canteen,
}

impl CategoryBucket {
    /// All sections in display order.
    pub const ALL: [Self; 4] = [
        Self::FnfSpecial,
        Self::SnacksCorner,
        Self::Cafeteria,
        Self::Canteen,
    ];

    /// The category label items must carry to land in this section.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FnfSpecial => "FNF Special",
            Self::SnacksCorner => "Snacks Corner",
            Self::Cafeteria => "Cafeteria",
            Self::Canteen => "Canteen",
        }
    }

    /// Page anchor for the section.
    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::FnfSpecial => "fnf",
            Self::SnacksCorner => "snack",
            Self::Cafeteria => "cafeteria",
            Self::Canteen => "canteen",
        }
    }

    /// Section for a category label. Exact match only.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

/// A non-empty section of the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    pub bucket: CategoryBucket,
    pub anchor: String,
    pub items: Vec<MenuItem>,
}

/// A menu split into storefront sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSections {
    /// Non-empty sections in display order.
    pub sections: Vec<MenuSection>,
    /// Items whose category matches no section, in input order.
    pub unrecognized: Vec<MenuItem>,
}

impl MenuSections {
    /// Partition `items` into sections, preserving input order within each.
    ///
    /// Sections with no items are omitted.
    #[must_use]
    pub fn group(items: impl IntoIterator<Item = MenuItem>) -> Self {
        let mut buckets: [Vec<MenuItem>; 4] = Default::default();
        let mut unrecognized = Vec::new();

        for item in items {
            match CategoryBucket::from_label(&item.category) {
                Some(bucket) => {
                    if let Some(slot) = buckets.get_mut(bucket as usize) {
                        slot.push(item);
                    }
                }
                None => unrecognized.push(item),
            }
        }

        let sections = CategoryBucket::ALL
            .into_iter()
            .zip(buckets)
            .filter(|(_, items)| !items.is_empty())
            .map(|(bucket, items)| MenuSection {
                bucket,
                anchor: bucket.anchor().to_string(),
                items,
            })
            .collect();

        Self {
            sections,
            unrecognized,
        }
    }

    /// The section for `bucket`, if it has any items.
    #[must_use]
    pub fn section(&self, bucket: CategoryBucket) -> Option<&MenuSection> {
        self.sections.iter().find(|s| s.bucket == bucket)
    }

    /// Distinct category labels that matched no section, sorted.
    #[must_use]
    pub fn unrecognized_categories(&self) -> Vec<&str> {
        self.unrecognized
            .iter()
            .map(|item| item.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Total number of items placed in a section.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}
