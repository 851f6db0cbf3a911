//! Column kind inference.

use crate::types::ColumnKind;
use crate::utils::{column_kind, is_boolean_string};
use polars::prelude::*;

/// Decide the kind of a column from its loaded type and, for text columns,
/// its values.
///
/// Text columns whose every non-missing value is a yes/no style token are
/// booleans; a text column with no values at all stays categorical.
pub(crate) fn infer_column_kind(series: &Series) -> PolarsResult<ColumnKind> {
    let kind = column_kind(series.dtype());
    if kind == ColumnKind::Categorical
        && series.dtype() == &DataType::String
        && is_boolean_text_column(series)?
    {
        return Ok(ColumnKind::Boolean);
    }
    Ok(kind)
}

fn is_boolean_text_column(series: &Series) -> PolarsResult<bool> {
    let mut seen_any = false;
    for val in series.str()?.into_iter().flatten() {
        if !is_boolean_string(val) {
            return Ok(false);
        }
        seen_any = true;
    }
    Ok(seen_any)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_types() {
        let ints = Series::new("a".into(), &[1i64, 2, 3]);
        let floats = Series::new("b".into(), &[1.5f64, 2.5]);
        let bools = Series::new("c".into(), &[true, false]);
        let text = Series::new("d".into(), &["x", "y"]);

        assert_eq!(infer_column_kind(&ints).unwrap(), ColumnKind::Numeric);
        assert_eq!(infer_column_kind(&floats).unwrap(), ColumnKind::Numeric);
        assert_eq!(infer_column_kind(&bools).unwrap(), ColumnKind::Boolean);
        assert_eq!(infer_column_kind(&text).unwrap(), ColumnKind::Categorical);
    }

    #[test]
    fn test_textual_booleans() {
        let series = Series::new("flag".into(), &[Some("Yes"), None, Some("no"), Some("YES")]);
        assert_eq!(infer_column_kind(&series).unwrap(), ColumnKind::Boolean);
    }

    #[test]
    fn test_mixed_text_is_categorical() {
        let series = Series::new("flag".into(), &["yes", "no", "maybe"]);
        assert_eq!(infer_column_kind(&series).unwrap(), ColumnKind::Categorical);
    }

    #[test]
    fn test_all_null_text_is_categorical() {
        let series = Series::new("empty".into(), &[None::<&str>, None]);
        assert_eq!(infer_column_kind(&series).unwrap(), ColumnKind::Categorical);
    }
}
