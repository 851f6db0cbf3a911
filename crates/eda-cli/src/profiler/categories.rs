//! Frequency tables for categorical columns.

use crate::error::Result;
use crate::types::{CategoryCount, CategoryTable, DatasetSummary, TopCategories};
use crate::utils::{share, string_values};
use polars::prelude::*;
use std::collections::HashMap;

pub(crate) fn top_categories(
    df: &DataFrame,
    summary: &DatasetSummary,
    k: usize,
    max_columns: usize,
) -> Result<TopCategories> {
    let total_rows = df.height();
    let mut tables = Vec::new();

    let categorical = summary.columns.iter().filter(|c| !c.kind.is_numeric());
    for col in categorical.take(max_columns) {
        let values = string_values(df.column(&col.name)?.as_materialized_series())?;
        let counts = value_counts(values.iter().flatten().map(String::as_str), k)
            .into_iter()
            .map(|(value, count)| CategoryCount {
                value,
                count,
                share: share(count, total_rows),
            })
            .collect();

        tables.push(CategoryTable {
            column: col.name.clone(),
            values: counts,
        });
    }

    Ok(TopCategories { tables })
}

/// Count distinct values, most frequent first, ties in first-seen order,
/// keeping at most `k`.
pub(crate) fn value_counts<'a>(
    values: impl IntoIterator<Item = &'a str>,
    k: usize,
) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for val in values {
        match index.get(val) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(val, counts.len());
                counts.push((val.to_string(), 1));
            }
        }
    }

    // stable: equal counts keep first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(k);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::DataProfiler;
    use pretty_assertions::assert_eq;

    fn ranked(df: &DataFrame, k: usize, max_columns: usize) -> TopCategories {
        let summary = DataProfiler::summarize_dataset(df).unwrap();
        top_categories(df, &summary, k, max_columns).unwrap()
    }

    #[test]
    fn test_value_counts_order_and_ties() {
        let counts = value_counts(["b", "a", "c", "a", "c", "d"], 10);
        assert_eq!(
            counts,
            vec![
                ("a".to_string(), 2),
                ("c".to_string(), 2),
                ("b".to_string(), 1),
                ("d".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_value_counts_truncates_to_k() {
        let counts = value_counts(["a", "b", "c", "a"], 2);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0], ("a".to_string(), 2));
        assert_eq!(counts[1], ("b".to_string(), 1));
    }

    #[test]
    fn test_top_category_excludes_missing() {
        let df = df!(
            "a" => &[Some(1i64), Some(2), None],
            "b" => &[Some("x"), Some("x"), Some("y")],
            "c" => &[None, None, Some("z")],
        )
        .unwrap();
        let top = ranked(&df, 5, 5);

        // numeric column "a" is not categorical
        assert_eq!(top.tables.len(), 2);
        assert!(top.get("a").is_none());

        let b = top.get("b").unwrap();
        assert_eq!(b.values[0].value, "x");
        assert_eq!(b.values[0].count, 2);
        assert!((b.values[0].share - 2.0 / 3.0).abs() < 1e-12);

        let c = top.get("c").unwrap();
        assert_eq!(c.values.len(), 1);
        assert_eq!(c.values[0].value, "z");
    }

    #[test]
    fn test_max_columns_cap() {
        let df = df!(
            "p" => &["x"],
            "q" => &["y"],
            "r" => &["z"],
        )
        .unwrap();
        let top = ranked(&df, 5, 2);
        let names: Vec<_> = top.tables.iter().map(|t| t.column.as_str()).collect();
        assert_eq!(names, vec!["p", "q"]);

        assert!(ranked(&df, 5, 0).is_empty());
    }

    #[test]
    fn test_boolean_columns_are_ranked() {
        let df = df!("flag" => &[true, false, true]).unwrap();
        let top = ranked(&df, 5, 5);
        let flag = top.get("flag").unwrap();
        assert_eq!(flag.values[0].value, "true");
        assert_eq!(flag.values[0].count, 2);
    }
}
