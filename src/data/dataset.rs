use std::collections::HashSet;

use crate::models::{FOOD_ITEM_COLUMN, FoodRecord, Metric};

/// The cleaned nutrition table, read-only after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<FoodRecord>,
}

impl Dataset {
    /// Create a dataset from records in display order.
    pub fn new(records: Vec<FoodRecord>) -> Self {
        Self { records }
    }

    /// Column names in display order: `FoodItem` then every metric.
    pub fn columns() -> Vec<&'static str> {
        let mut columns = vec![FOOD_ITEM_COLUMN];
        columns.extend(Metric::ALL.into_iter().map(Metric::as_str));
        columns
    }

    /// All records in original order.
    pub fn records(&self) -> &[FoodRecord] {
        &self.records
    }

    /// Rows displayed on a page; empty when the page is past the end.
    pub fn page(&self, page: usize, page_size: usize) -> &[FoodRecord] {
        if page_size == 0 {
            return &[];
        }
        let start = page.saturating_mul(page_size);
        if start >= self.records.len() {
            return &[];
        }
        let end = start.saturating_add(page_size).min(self.records.len());
        &self.records[start..end]
    }

    /// Number of pages; an empty dataset still shows one (empty) page.
    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.records.len().div_ceil(page_size).max(1)
    }

    /// Every record whose name is in `names`, in original order.
    pub fn records_named<'a>(
        &'a self,
        names: &'a HashSet<&str>,
    ) -> impl Iterator<Item = &'a FoodRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| names.contains(r.food_item.as_str()))
    }

    /// Count of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
