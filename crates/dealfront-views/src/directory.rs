//! Brand directory: filter, sort and A–Z grouping over counted brands.

use dealfront_core::BrandWithCount;
use serde::Serialize;

use crate::cards::BrandCard;
use crate::search::{filter_brands_by_text, first_letter, group_by_first_letter, sort_brands, BrandSort};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryQuery {
    pub text: String,
    pub sort: BrandSort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterGroup {
    pub letter: String,
    pub brands: Vec<BrandCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandDirectory {
    pub query: String,
    pub sort: BrandSort,
    /// Brands before filtering.
    pub total_brands: usize,
    /// Filtered and sorted brands.
    pub brands: Vec<BrandCard>,
    /// A–Z sections; only populated for [`BrandSort::Name`].
    pub groups: Vec<LetterGroup>,
    /// Letters that have at least one brand, computed before filtering so the
    /// letter index stays stable while typing.
    pub available_letters: Vec<String>,
    pub is_empty: bool,
}

#[must_use]
pub fn build_directory(brands: Vec<BrandWithCount>, query: &DirectoryQuery) -> BrandDirectory {
    let total_brands = brands.len();
    let mut available_letters: Vec<String> =
        brands.iter().map(|b| first_letter(&b.brand.name)).collect();
    available_letters.sort();
    available_letters.dedup();

    let mut filtered = filter_brands_by_text(brands, &query.text);
    sort_brands(&mut filtered, query.sort);

    let cards = BrandCard::many(&filtered);
    let groups = match query.sort {
        BrandSort::Name => group_by_first_letter(filtered)
            .into_iter()
            .map(|(letter, members)| LetterGroup {
                letter,
                brands: BrandCard::many(&members),
            })
            .collect(),
        BrandSort::Popular => Vec::new(),
    };

    BrandDirectory {
        query: query.text.trim().to_string(),
        sort: query.sort,
        total_brands,
        is_empty: cards.is_empty(),
        brands: cards,
        groups,
        available_letters,
    }
}
