//! Plan many start/goal pairs against one zone set (CSV in, CSV out).

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use dronepath::api::{validate_position, PathSearch, Point, SearchFailure};
use polars::prelude::*;

const PAIR_COLUMNS: [&str; 4] = ["start_lng", "start_lat", "goal_lng", "goal_lat"];

/// Row counts by outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub ok: usize,
    pub unreachable: usize,
    pub budget_exceeded: usize,
    pub invalid: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.ok + self.unreachable + self.budget_exceeded + self.invalid
    }
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let s = df
        .column(name)
        .with_context(|| format!("pairs file has no column {name}"))?
        .cast(&DataType::Float64)?;
    Ok(s.f64()?.into_iter().collect())
}

/// Read pairs, run `search` on each, write `row,status,waypoints,length,expansions`.
pub fn run_batch(search: &PathSearch<'_>, pairs: &Path, out: &Path) -> Result<BatchSummary> {
    let df = LazyCsvReader::new(pairs)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()?
        .collect()
        .with_context(|| format!("reading {}", pairs.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), "pairs_loaded");

    let cols = PAIR_COLUMNS
        .iter()
        .map(|name| float_column(&df, name))
        .collect::<Result<Vec<_>>>()?;

    let n = df.height();
    let mut summary = BatchSummary::default();
    let mut rows: Vec<u32> = Vec::with_capacity(n);
    let mut status: Vec<&str> = Vec::with_capacity(n);
    let mut waypoints: Vec<u32> = Vec::with_capacity(n);
    let mut length: Vec<Option<f64>> = Vec::with_capacity(n);
    let mut expansions: Vec<u32> = Vec::with_capacity(n);

    for i in 0..n {
        rows.push(i as u32);
        let endpoints = match (cols[0][i], cols[1][i], cols[2][i], cols[3][i]) {
            (Some(a), Some(b), Some(c), Some(d)) => Some((Point::new(a, b), Point::new(c, d))),
            _ => None,
        };
        let valid = endpoints.filter(|(s, g)| {
            validate_position(*s).is_ok() && validate_position(*g).is_ok()
        });
        let Some((start, goal)) = valid else {
            tracing::warn!(row = i, "skipping pair with missing or out-of-range coordinates");
            summary.invalid += 1;
            status.push("invalid_input");
            waypoints.push(0);
            length.push(None);
            expansions.push(0);
            continue;
        };
        match search.run(start, goal) {
            Ok(route) => {
                summary.ok += 1;
                status.push("ok");
                waypoints.push(route.waypoints.len() as u32);
                length.push(Some(route.length));
                expansions.push(route.expansions as u32);
            }
            Err(failure) => {
                match failure {
                    SearchFailure::Unreachable { .. } => {
                        summary.unreachable += 1;
                        status.push("unreachable");
                    }
                    SearchFailure::BudgetExceeded { .. } => {
                        summary.budget_exceeded += 1;
                        status.push("budget_exceeded");
                    }
                }
                waypoints.push(0);
                length.push(None);
                expansions.push(failure.expansions() as u32);
            }
        }
    }

    let mut table = df!(
        "row" => rows,
        "status" => status,
        "waypoints" => waypoints,
        "length" => length,
        "expansions" => expansions,
    )?;
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file).finish(&mut table)?;
    tracing::info!(
        ok = summary.ok,
        unreachable = summary.unreachable,
        budget_exceeded = summary.budget_exceeded,
        invalid = summary.invalid,
        "batch_done"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dronepath::api::{Region, SearchCfg};
    use std::fs;
    use tempfile::tempdir;

    fn rect(name: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Region {
        Region::new(
            name,
            vec![
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
        )
    }

    #[test]
    fn batch_writes_one_row_per_pair() {
        let dir = tempdir().unwrap();
        let pairs = dir.path().join("pairs.csv");
        let out = dir.path().join("out.csv");
        fs::write(
            &pairs,
            "start_lng,start_lat,goal_lng,goal_lat\n\
             0.0,0.0,1.0,0.0\n\
             0.0,0.0,0.0,0.0\n\
             0.0,0.0,300.0,0.0\n\
             0.0,0.0,3.0,0.0\n",
        )
        .unwrap();
        let cfg = SearchCfg {
            step_length: 0.05,
            close_distance: 0.03,
            max_iterations: 200,
            ..SearchCfg::default()
        };
        let zones = vec![rect("cage", 2.9, -0.1, 3.1, 0.1)];
        let area = rect("central", 5.0, 5.0, 6.0, 6.0);
        let search = PathSearch::new(cfg, &zones, &area);
        let summary = run_batch(&search, &pairs, &out).unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                ok: 2,
                unreachable: 0,
                budget_exceeded: 1,
                invalid: 1,
            }
        );
        assert_eq!(summary.total(), 4);

        let written = fs::read_to_string(&out).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next().unwrap(),
            "row,status,waypoints,length,expansions"
        );
        let statuses: Vec<&str> = lines
            .map(|l| l.split(',').nth(1).unwrap())
            .collect();
        assert_eq!(statuses, ["ok", "ok", "invalid_input", "budget_exceeded"]);
    }

    #[test]
    fn missing_columns_are_reported() {
        let dir = tempdir().unwrap();
        let pairs = dir.path().join("pairs.csv");
        fs::write(&pairs, "a,b\n1,2\n").unwrap();
        let area = rect("central", 5.0, 5.0, 6.0, 6.0);
        let search = PathSearch::new(SearchCfg::default(), &[], &area);
        let err = run_batch(&search, &pairs, &dir.path().join("out.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("start_lng"));
    }
}
