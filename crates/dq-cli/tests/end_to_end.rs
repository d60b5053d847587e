//! File-to-file runs: ingest a raw CSV, run the pipeline, and check
//! what landed at the destination.

use dq_cli::loader::CsvFileLoader;
use dq_ingest::read_table_path;
use dq_model::{QualityConfig, RoutingDecision, RunStatus};
use dq_pipeline::Pipeline;

const MESSY_ORDERS: &str = "\
order_id,amount,order_date
O1,420,2025-02-01
O2,,2025-02-02
O2,450,2025-02-02
O3,470,2025-02-03
O4,480,15/02/2025
O5,500,2025-02-05
O6,510,2025-02-06
O7,,2025-02-07
O7,520,2025-02-07
O8,540,2025-02-08
O9,560,2025-02-09
O10,600,2025-02-10
O11,95000,2025-02-11
O12,88000,2025-02-12
O13,,2025-02-14
";

#[test]
fn messy_csv_lands_cleaned_at_the_destination() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("orders.csv");
    std::fs::write(&input, MESSY_ORDERS).unwrap();
    let destination = dir.path().join("output").join("orders.csv");

    let dataset = read_table_path(&input).unwrap();
    let mut pipeline = Pipeline::new(
        QualityConfig::default(),
        CsvFileLoader::new(&destination),
    );
    let result = pipeline.run("orders.csv", &dataset, None);

    assert_eq!(result.status, RunStatus::Success);
    assert_eq!(result.decision, Some(RoutingDecision::Clean));
    assert_eq!(result.rows_in, 15);
    assert_eq!(result.rows_out, 13);

    let content = std::fs::read_to_string(&destination).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 14);
    assert_eq!(lines[0], "order_id,amount,order_date");
    // One surviving row per duplicate key.
    let o2_rows: Vec<&&str> = lines.iter().filter(|line| line.starts_with("O2,")).collect();
    assert_eq!(o2_rows.len(), 1);
    assert!(o2_rows[0].starts_with("O2,450,"));
    // Dates are canonical, including the day-first input.
    assert!(lines.iter().any(|line| line.contains(",2025-02-15")));
    assert!(!content.contains("15/02/2025"));
    // Outliers were capped, nulls filled.
    assert!(!content.contains("95000"));
    assert!(!content.contains("88000"));
    assert!(lines.iter().any(|line| line.starts_with("O13,0,")));
}

#[test]
fn null_heavy_csv_is_rejected_and_nothing_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("orders.csv");
    std::fs::write(
        &input,
        "order_id,amount\nO1,\nO2,\nO3,\nO4,\nO5,100\nO6,100\nO7,100\nO8,100\nO9,100\nO10,100\n",
    )
    .unwrap();
    let destination = dir.path().join("output").join("orders.csv");

    let dataset = read_table_path(&input).unwrap();
    let mut pipeline = Pipeline::new(
        QualityConfig::default(),
        CsvFileLoader::new(&destination),
    );
    let result = pipeline.run("orders.csv", &dataset, None);

    assert_eq!(result.status, RunStatus::Rejected);
    assert!(result.score() < 60);
    assert!(!destination.exists());
}
