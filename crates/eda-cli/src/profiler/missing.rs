//! Missing value counts per column.

use crate::error::Result;
use crate::types::{MissingEntry, MissingTable};
use crate::utils::{missing_count, share};
use polars::prelude::*;

pub(crate) fn missing_table(df: &DataFrame) -> Result<MissingTable> {
    let total_rows = df.height();
    let entries = df
        .get_columns()
        .iter()
        .map(|col| -> Result<MissingEntry> {
            let count = missing_count(col.as_materialized_series())?;
            Ok(MissingEntry {
                column: col.name().to_string(),
                missing_count: count,
                missing_share: share(count, total_rows),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MissingTable { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_share_is_exact() {
        let df = df!(
            "a" => &[Some(1i64), Some(2), None],
            "b" => &["x", "x", "y"],
        )
        .unwrap();
        let table = missing_table(&df).unwrap();

        let a = table.get("a").unwrap();
        assert_eq!(a.missing_count, 1);
        assert_eq!(a.missing_share, 1.0 / 3.0);

        let b = table.get("b").unwrap();
        assert_eq!(b.missing_count, 0);
        assert_eq!(b.missing_share, 0.0);
    }

    #[test]
    fn test_zero_rows_share_is_zero() {
        let df = df!("a" => Vec::<f64>::new()).unwrap();
        let table = missing_table(&df).unwrap();

        assert_eq!(table.entries.len(), 1);
        assert_eq!(table.entries[0].missing_share, 0.0);
    }

    #[test]
    fn test_empty_table() {
        let table = missing_table(&DataFrame::empty()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_share(), 0.0);
    }

    #[test]
    fn test_problematic_threshold_is_inclusive() {
        let df = df!(
            "half" => &[Some(1.0f64), None],
            "full" => &[Some(1.0f64), Some(2.0)],
        )
        .unwrap();
        let table = missing_table(&df).unwrap();

        let flagged: Vec<_> = table.problematic(0.5).iter().map(|e| e.column.as_str()).collect();
        assert_eq!(flagged, vec!["half"]);
        assert_eq!(table.max_share(), 0.5);
    }
}
