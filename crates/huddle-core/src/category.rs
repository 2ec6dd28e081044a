// crates/huddle-core/src/category.rs
//
// The fixed cuisine category set that every member rates.
//
// Each category has an external key (as stored in preference rows) and a
// display label (as returned in consensus results). The two are a fixed
// one-to-one mapping and must not drift.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HuddleError;

/// A cuisine category.
///
/// Serialized with its external key (`"american"`, `"southeastAsian"`, ...).
/// Use [`Category::label`] for the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    American,
    Bar,
    Chinese,
    Dessert,
    Exotic,
    French,
    Hongkong,
    Italian,
    Japanese,
    Korean,
    SoutheastAsian,
    Thai,
    Vietnamese,
    Western,
}

impl Category {
    /// All categories in canonical column order.
    pub const ALL: [Category; 14] = [
        Category::American,
        Category::Bar,
        Category::Chinese,
        Category::Dessert,
        Category::Exotic,
        Category::French,
        Category::Hongkong,
        Category::Italian,
        Category::Japanese,
        Category::Korean,
        Category::SoutheastAsian,
        Category::Thai,
        Category::Vietnamese,
        Category::Western,
    ];

    /// Position in canonical column order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// External key used by preference storage.
    pub fn key(self) -> &'static str {
        match self {
            Category::American => "american",
            Category::Bar => "bar",
            Category::Chinese => "chinese",
            Category::Dessert => "dessert",
            Category::Exotic => "exotic",
            Category::French => "french",
            Category::Hongkong => "hongkong",
            Category::Italian => "italian",
            Category::Japanese => "japanese",
            Category::Korean => "korean",
            Category::SoutheastAsian => "southeastAsian",
            Category::Thai => "thai",
            Category::Vietnamese => "vietnamese",
            Category::Western => "western",
        }
    }

    /// Display label returned to clients.
    pub fn label(self) -> &'static str {
        match self {
            Category::American => "美式",
            Category::Bar => "酒吧",
            Category::Chinese => "中式",
            Category::Dessert => "甜點",
            Category::Exotic => "異國料理",
            Category::French => "法式",
            Category::Hongkong => "港式",
            Category::Italian => "義式",
            Category::Japanese => "日式",
            Category::Korean => "韓式",
            Category::SoutheastAsian => "東南亞",
            Category::Thai => "泰式",
            Category::Vietnamese => "越式",
            Category::Western => "西式",
        }
    }

    /// Look up a category by its external key. Matching is exact.
    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.key() == key)
    }

    /// Look up a category by its display label.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = HuddleError;

    /// Accepts either the external key or the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_key(s)
            .or_else(|| Category::from_label(s))
            .ok_or_else(|| HuddleError::MalformedData(format!("unknown category: {}", s)))
    }
}
