use crate::core::feature_schema::FeatureSchema;
use crate::core::training_sample::{Target, TrainingSample};
use crate::error::{PipelineError, Result};
use crate::predictors::TaskKind;

fn strip_surrounding_quotes(s: &str) -> &str {
    let t = s.trim();
    for quote in ['"', '\''] {
        if t.len() >= 2 && t.starts_with(quote) && t.ends_with(quote) {
            return &t[1..t.len() - 1];
        }
    }
    t
}

fn is_missing_marker(s: &str) -> bool {
    s.is_empty() || s == "?"
}

/// Turns an already-split table into a schema and training samples.
///
/// Every column but the last is a numeric feature, named by `header`. The last
/// column is the target: a label for [`TaskKind::Classification`], a number for
/// [`TaskKind::Regression`]. Missing (`?` or empty) and unparsable cells are
/// rejected, never filled in.
pub fn samples_from_table<H, C>(
    header: &[H],
    rows: &[Vec<C>],
    task: TaskKind,
) -> Result<(FeatureSchema, Vec<TrainingSample>)>
where
    H: AsRef<str>,
    C: AsRef<str>,
{
    if header.len() < 2 {
        return Err(PipelineError::InvalidSchema {
            reason: format!(
                "a table needs at least one feature column and a target column, got {} columns",
                header.len()
            ),
        });
    }

    let feature_names: Vec<&str> = header[..header.len() - 1]
        .iter()
        .map(|h| strip_surrounding_quotes(h.as_ref()))
        .collect();
    let schema = FeatureSchema::from_names(&feature_names)?;

    let mut samples = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.iter().enumerate() {
        samples.push(parse_row(row, row_idx, header.len(), task)?);
    }

    Ok((schema, samples))
}

fn parse_row<C: AsRef<str>>(
    row: &[C],
    row_idx: usize,
    width: usize,
    task: TaskKind,
) -> Result<TrainingSample> {
    if row.len() != width {
        return Err(PipelineError::InconsistentArity {
            sample: row_idx,
            expected: width - 1,
            found: row.len().saturating_sub(1),
        });
    }

    let invalid = |column: usize, raw: &str| PipelineError::InvalidCell {
        row: row_idx,
        column,
        value: raw.to_string(),
    };

    let mut features = Vec::with_capacity(width - 1);
    for (column, cell) in row[..width - 1].iter().enumerate() {
        let raw = strip_surrounding_quotes(cell.as_ref());
        if is_missing_marker(raw) {
            return Err(invalid(column, raw));
        }
        let v: f64 = raw.parse().map_err(|_| invalid(column, raw))?;
        if !v.is_finite() {
            return Err(invalid(column, raw));
        }
        features.push(v);
    }

    let raw = strip_surrounding_quotes(row[width - 1].as_ref());
    if is_missing_marker(raw) {
        return Err(invalid(width - 1, raw));
    }
    let target = match task {
        TaskKind::Classification => Target::Label(raw.to_string()),
        TaskKind::Regression => {
            let v: f64 = raw.parse().map_err(|_| invalid(width - 1, raw))?;
            if !v.is_finite() {
                return Err(invalid(width - 1, raw));
            }
            Target::Value(v)
        }
    };

    Ok(TrainingSample { features, target })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn classification_table_splits_features_and_label() {
        let header = ["N", "P", "label"];
        let rows = table(&[&["90", "42", "rice"], &[" 71 ", "54", "'maize'"]]);
        let (schema, samples) =
            samples_from_table(&header, &rows, TaskKind::Classification).unwrap();

        assert_eq!(schema.names().collect::<Vec<_>>(), ["N", "P"]);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].features, vec![90.0, 42.0]);
        assert_eq!(samples[1].target, Target::Label("maize".into()));
    }

    #[test]
    fn regression_table_parses_numeric_target() {
        let header = ["Month", "Year", "Rainfall", "WPI"];
        let rows = table(&[&["1", "2012", "29", "104.5"]]);
        let (schema, samples) = samples_from_table(&header, &rows, TaskKind::Regression).unwrap();
        assert_eq!(schema.arity(), 3);
        assert_eq!(samples[0].target, Target::Value(104.5));
    }

    #[test]
    fn missing_cell_is_rejected_not_defaulted() {
        let rows = table(&[&["1", "?", "a"]]);
        let err = samples_from_table(&["x", "y", "c"], &rows, TaskKind::Classification).unwrap_err();
        assert_eq!(
            err,
            PipelineError::InvalidCell {
                row: 0,
                column: 1,
                value: "?".into()
            }
        );
    }

    #[test]
    fn non_numeric_feature_or_target_is_rejected() {
        let rows = table(&[&["abc", "1"]]);
        assert!(matches!(
            samples_from_table(&["x", "y"], &rows, TaskKind::Regression),
            Err(PipelineError::InvalidCell { column: 0, .. })
        ));

        let rows = table(&[&["1", "high"]]);
        assert!(matches!(
            samples_from_table(&["x", "y"], &rows, TaskKind::Regression),
            Err(PipelineError::InvalidCell { column: 1, .. })
        ));

        let rows = table(&[&["NaN", "1"]]);
        assert!(samples_from_table(&["x", "y"], &rows, TaskKind::Regression).is_err());
    }

    #[test]
    fn ragged_row_reports_arity() {
        let rows = table(&[&["1", "2", "a"], &["1", "a"]]);
        let err = samples_from_table(&["x", "y", "c"], &rows, TaskKind::Classification).unwrap_err();
        assert_eq!(
            err,
            PipelineError::InconsistentArity {
                sample: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn header_needs_a_feature_and_a_target() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert!(matches!(
            samples_from_table(&["label"], &rows, TaskKind::Classification),
            Err(PipelineError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn strips_matching_quotes_only() {
        assert_eq!(strip_surrounding_quotes("'a b'"), "a b");
        assert_eq!(strip_surrounding_quotes("\"x\""), "x");
        assert_eq!(strip_surrounding_quotes("'x\""), "'x\"");
        assert_eq!(strip_surrounding_quotes("'"), "'");
    }
}
