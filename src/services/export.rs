//! CSV and JSON export of comparison reports.

use crate::error::Result;
use crate::types::ComparisonReport;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// One CSV line; field order is the column order.
#[derive(Serialize)]
struct CsvRecord<'a> {
    asset: &'a str,
    ticker: &'a str,
    category: &'static str,
    recommendation: &'static str,
    score: f64,
    price: f64,
    target: f64,
    return_pct: f64,
    direction: &'static str,
    confidence: f64,
    trend: Option<&'static str>,
    rsi: Option<f64>,
    volatility: f64,
    bullish_patterns: usize,
    bearish_patterns: usize,
    total_patterns: usize,
}

/// Write the ranked rows as CSV with a header line.
pub fn write_csv<W: Write>(report: &ComparisonReport, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in &report.rows {
        csv.serialize(CsvRecord {
            asset: &row.asset,
            ticker: &row.ticker,
            category: row.category.label(),
            recommendation: row.recommendation.label(),
            score: row.score,
            price: row.price,
            target: row.target,
            return_pct: row.return_pct,
            direction: row.direction.label(),
            confidence: row.confidence,
            trend: row.trend.map(|t| t.label()),
            rsi: row.rsi,
            volatility: row.volatility,
            bullish_patterns: row.bullish_patterns,
            bearish_patterns: row.bearish_patterns,
            total_patterns: row.total_patterns,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the full report as pretty JSON.
pub fn write_json<W: Write>(report: &ComparisonReport, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// `comparison_<YYYYmmdd_HHMMSS>.<extension>` inside `dir`.
pub fn report_path(dir: &Path, report: &ComparisonReport, extension: &str) -> PathBuf {
    dir.join(format!(
        "comparison_{}.{}",
        report.generated_at.format("%Y%m%d_%H%M%S"),
        extension
    ))
}

/// Export the report as CSV into `dir`, creating it if needed.
pub fn export_csv(report: &ComparisonReport, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = report_path(dir, report, "csv");
    write_csv(report, BufWriter::new(File::create(&path)?))?;
    info!("Exported {} rows to {}", report.rows.len(), path.display());
    Ok(path)
}

/// Export the report as JSON into `dir`, creating it if needed.
pub fn export_json(report: &ComparisonReport, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = report_path(dir, report, "json");
    let mut writer = BufWriter::new(File::create(&path)?);
    write_json(report, &mut writer)?;
    writer.flush()?;
    info!("Exported report to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ChartRange, ComparisonRow, Direction, Interval, Recommendation, ScoreCategory, TrendLabel,
    };
    use chrono::{TimeZone, Utc};

    fn report() -> ComparisonReport {
        ComparisonReport {
            generated_at: Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap(),
            range: ChartRange::SixMonths,
            interval: Interval::OneDay,
            rows: vec![
                ComparisonRow {
                    asset: "Apple".to_string(),
                    ticker: "AAPL".to_string(),
                    category: ScoreCategory::Bullish,
                    recommendation: Recommendation::Buy,
                    score: 64.5,
                    price: 180.0,
                    target: 189.0,
                    return_pct: 5.0,
                    direction: Direction::Bullish,
                    confidence: 70.0,
                    trend: Some(TrendLabel::Bullish),
                    rsi: Some(61.25),
                    volatility: 1.4,
                    bullish_patterns: 3,
                    bearish_patterns: 1,
                    total_patterns: 4,
                },
                ComparisonRow {
                    asset: "Gold".to_string(),
                    ticker: "GC=F".to_string(),
                    category: ScoreCategory::Neutral,
                    recommendation: Recommendation::Caution,
                    score: 38.0,
                    price: 2000.0,
                    target: 2000.0,
                    return_pct: 0.0,
                    direction: Direction::Sideways,
                    confidence: 50.0,
                    trend: None,
                    rsi: None,
                    volatility: 0.8,
                    bullish_patterns: 0,
                    bearish_patterns: 0,
                    total_patterns: 0,
                },
            ],
            failures: Vec::new(),
        }
    }

    #[test]
    fn test_csv_columns_and_rows() {
        let mut buf = Vec::new();
        write_csv(&report(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "asset,ticker,category,recommendation,score,price,target,return_pct,direction,\
             confidence,trend,rsi,volatility,bullish_patterns,bearish_patterns,total_patterns"
        );
        assert_eq!(
            lines[1],
            "Apple,AAPL,bullish,Buy,64.5,180.0,189.0,5.0,Bullish,70.0,bullish,61.25,1.4,3,1,4"
        );
        assert_eq!(
            lines[2],
            "Gold,GC=F,neutral,Caution,38.0,2000.0,2000.0,0.0,Neutral/Sideways,50.0,,,0.8,0,0,0"
        );
    }

    #[test]
    fn test_report_path_uses_timestamp() {
        let path = report_path(Path::new("out/reports"), &report(), "csv");
        assert_eq!(path, PathBuf::from("out/reports/comparison_20240305_140709.csv"));
    }

    #[test]
    fn test_export_files() {
        let dir = tempfile::tempdir().unwrap();
        let reports = dir.path().join("reports");

        let csv_path = export_csv(&report(), &reports).unwrap();
        assert!(csv_path.exists());

        let json_path = export_json(&report(), &reports).unwrap();
        let parsed: ComparisonReport =
            serde_json::from_str(&fs::read_to_string(json_path).unwrap()).unwrap();
        assert_eq!(parsed.rows, report().rows);
    }
}
