use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dimension, SalesTable};

// ---------------------------------------------------------------------------
// Filter predicate: which values are admissible per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection: maps dimension → set of admissible values.
/// A dimension absent from the map is unconstrained; a present but empty set
/// admits nothing.
pub type Selection = BTreeMap<Dimension, BTreeSet<String>>;

/// Default selection shown on startup: the first `region_count` regions and
/// every category.
pub fn default_selection(table: &SalesTable, region_count: usize) -> Selection {
    let mut selection = Selection::new();
    selection.insert(
        Dimension::Region,
        table
            .distinct(Dimension::Region)
            .iter()
            .take(region_count)
            .cloned()
            .collect(),
    );
    selection.insert(
        Dimension::Category,
        table.distinct(Dimension::Category).iter().cloned().collect(),
    );
    selection
}

/// Return indices of records that pass all active filters.
///
/// A record passes a dimension filter when:
/// * The dimension is not present in `selection` → passes (no constraint)
/// * The set for that dimension is empty → nothing selected → fails
/// * The record's value for that dimension is in the set → passes
pub fn filtered_indices(table: &SalesTable, selection: &Selection) -> Vec<usize> {
    if selection.values().any(BTreeSet::is_empty) {
        return Vec::new();
    }

    // Dimensions where every observed value is selected need no per-row check.
    let active: Vec<(Dimension, &BTreeSet<String>)> = selection
        .iter()
        .filter(|(dim, selected)| {
            let all_vals = table.distinct(**dim);
            !all_vals.iter().all(|v| selected.contains(v))
        })
        .map(|(dim, selected)| (*dim, selected))
        .collect();

    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            active
                .iter()
                .all(|(dim, selected)| selected.contains(rec.dimension(*dim)))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Return a new table holding only the records that pass `selection`.
/// The source table is left untouched.
pub fn filter(table: &SalesTable, selection: &Selection) -> SalesTable {
    let indices = filtered_indices(table, selection);
    if indices.len() == table.len() {
        return table.clone();
    }
    let records = indices
        .into_iter()
        .map(|i| table.records[i].clone())
        .collect();
    SalesTable::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn sample() -> SalesTable {
        SalesTable::from_records(vec![
            record("West", "Furniture", "Chairs", 100.0, 20.0, 2),
            record("East", "Technology", "Phones", 200.0, -10.0, 5),
            record("Central", "Office Supplies", "Paper", 15.0, 3.0, 7),
            record("South", "Furniture", "Tables", 300.0, -40.0, 1),
            record("West", "Technology", "Copiers", 900.0, 150.0, 3),
        ])
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn no_constraints_is_identity() {
        let table = sample();
        assert_eq!(filter(&table, &Selection::new()), table);
    }

    #[test]
    fn and_across_dimensions_or_within() {
        let table = sample();
        let mut sel = Selection::new();
        sel.insert(Dimension::Region, set(&["West", "East"]));
        sel.insert(Dimension::Category, set(&["Technology"]));

        assert_eq!(filtered_indices(&table, &sel), vec![1, 4]);
    }

    #[test]
    fn empty_dimension_set_matches_nothing() {
        let table = sample();
        let mut sel = default_selection(&table, 10);
        sel.insert(Dimension::Category, BTreeSet::new());

        let result = filter(&table, &sel);
        assert!(result.is_empty());
    }

    #[test]
    fn no_matching_rows_is_empty_not_error() {
        let table = sample();
        let mut sel = Selection::new();
        sel.insert(Dimension::Region, set(&["North"]));
        assert!(filter(&table, &sel).is_empty());
    }

    #[test]
    fn result_is_subset_of_source() {
        let table = sample();
        let mut sel = Selection::new();
        sel.insert(Dimension::SubCategory, set(&["Chairs", "Paper", "Copiers"]));

        let result = filter(&table, &sel);
        assert_eq!(result.len(), 3);
        assert!(result.records.iter().all(|r| table.records.contains(r)));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn filtering_is_idempotent() {
        let table = sample();
        let mut sel = Selection::new();
        sel.insert(Dimension::Region, set(&["West", "South"]));
        sel.insert(Dimension::Category, set(&["Furniture"]));

        let once = filter(&table, &sel);
        let twice = filter(&once, &sel);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn default_selection_takes_first_regions_and_all_categories() {
        let table = sample();
        let sel = default_selection(&table, 3);

        assert_eq!(sel[&Dimension::Region], set(&["West", "East", "Central"]));
        assert_eq!(
            sel[&Dimension::Category],
            set(&["Furniture", "Technology", "Office Supplies"])
        );
        assert!(!sel.contains_key(&Dimension::SubCategory));
        assert_eq!(filtered_indices(&table, &sel), vec![0, 1, 2, 4]);
    }
}
