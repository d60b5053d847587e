//! Detect -> score -> plan -> apply on a messy order dataset.

use dq_clean::{apply, plan};
use dq_model::{
    CellValue, ColumnMeta, ColumnType, Dataset, QualityConfig, RepairOp, RoutingDecision, Schema,
};
use dq_quality::{detect, route, score};

fn messy_orders() -> Dataset {
    let schema = Schema::new(vec![
        ColumnMeta::new("order_id", ColumnType::Text),
        ColumnMeta::new("amount", ColumnType::Number),
        ColumnMeta::new("order_date", ColumnType::Text),
    ]);
    let raw: Vec<(&str, Option<f64>, &str)> = vec![
        ("O1", Some(420.0), "2025-02-01"),
        ("O2", None, "2025-02-02"),
        ("O2", Some(450.0), "2025-02-02"),
        ("O3", Some(470.0), "2025-02-03"),
        ("O4", Some(480.0), "15/02/2025"),
        ("O5", Some(500.0), "2025-02-05"),
        ("O6", Some(510.0), "2025-02-06"),
        ("O7", None, "2025-02-07"),
        ("O7", Some(520.0), "2025-02-07"),
        ("O8", Some(540.0), "2025-02-08"),
        ("O9", Some(560.0), "2025-02-09"),
        ("O10", Some(600.0), "2025-02-10"),
        ("O11", Some(95000.0), "2025-02-11"),
        ("O12", Some(88000.0), "2025-02-12"),
        ("O13", None, "2025-02-14"),
    ];
    let rows = raw
        .into_iter()
        .map(|(id, amount, date)| {
            vec![
                CellValue::text(id),
                amount.map_or(CellValue::Missing, CellValue::Number),
                CellValue::text(date),
            ]
        })
        .collect();
    Dataset::from_rows(schema, rows).unwrap()
}

#[test]
fn messy_orders_route_to_clean_and_come_out_repaired() {
    let config = QualityConfig::default();
    let dataset = messy_orders();

    let issues = detect(&dataset, &config);
    let report = score(&dataset, &issues, &config);
    assert!(
        (60..=80).contains(&report.score),
        "score {} outside the cleaning band",
        report.score
    );
    assert_eq!(route(report.score, &config), RoutingDecision::Clean);

    let plan = plan(&issues);
    let ops: Vec<RepairOp> = plan.steps.iter().map(|step| step.op).collect();
    assert_eq!(
        ops,
        vec![
            RepairOp::Deduplicate,
            RepairOp::NormalizeDates,
            RepairOp::CapOutliers,
            RepairOp::FillNulls,
        ]
    );

    let (cleaned, fixes) = apply(&dataset, &plan, &config);
    assert_eq!(cleaned.row_count(), 13);
    assert_eq!(fixes.len(), 4);

    // The data-bearing member of each duplicate pair survived.
    let amount = cleaned.column_index("amount").unwrap();
    let o2 = cleaned
        .rows()
        .iter()
        .find(|row| row[0].render() == "O2")
        .unwrap();
    assert_eq!(o2[amount], CellValue::Number(450.0));

    // Outliers sit on the boundary, not at a fixed literal.
    let values: Vec<f64> = cleaned
        .column_values(amount)
        .filter_map(CellValue::as_number)
        .collect();
    let top = values.iter().cloned().fold(f64::MIN, f64::max);
    assert!(top < 88000.0);
    assert_eq!(values.iter().filter(|&&value| value == top).count(), 2);

    // The remaining null was filled with the numeric default.
    assert!(values.contains(&0.0));
    assert_eq!(
        cleaned
            .column_values(amount)
            .filter(|cell| cell.is_missing())
            .count(),
        0
    );

    // Every date renders canonically.
    let date = cleaned.column_index("order_date").unwrap();
    for cell in cleaned.column_values(date) {
        assert!(matches!(cell, CellValue::Date(_)));
    }
    let bad = cleaned
        .rows()
        .iter()
        .find(|row| row[0].render() == "O4")
        .unwrap();
    assert_eq!(bad[date].render(), "2025-02-15");
}

#[test]
fn each_repair_is_idempotent_on_messy_data() {
    let config = QualityConfig::default();
    let dataset = messy_orders();
    let amount = vec!["amount".to_string()];
    let date = vec!["order_date".to_string()];

    let deduped = dq_clean::deduplicate(&dataset, &config);
    assert_eq!(dq_clean::deduplicate(&deduped, &config), deduped);

    let normalized = dq_clean::normalize_dates(&dataset, &date);
    assert_eq!(dq_clean::normalize_dates(&normalized, &date), normalized);

    let capped = dq_clean::cap_outliers(&dataset, &amount, config.outlier_multiple);
    assert_eq!(
        dq_clean::cap_outliers(&capped, &amount, config.outlier_multiple),
        capped
    );

    let filled = dq_clean::fill_nulls(&dataset, &amount, &config);
    assert_eq!(dq_clean::fill_nulls(&filled, &amount, &config), filled);
}

#[test]
fn clean_dataset_needs_no_plan() {
    let schema = Schema::new(vec![
        ColumnMeta::new("order_id", ColumnType::Text),
        ColumnMeta::new("amount", ColumnType::Number),
    ]);
    let rows = (1..=10)
        .map(|i| {
            vec![
                CellValue::text(format!("O{i}")),
                CellValue::Number(100.0 + i as f64),
            ]
        })
        .collect();
    let dataset = Dataset::from_rows(schema, rows).unwrap();
    let config = QualityConfig::default();

    let issues = detect(&dataset, &config);
    assert!(issues.is_empty());
    let report = score(&dataset, &issues, &config);
    assert_eq!(report.score, 100);
    assert_eq!(route(report.score, &config), RoutingDecision::Proceed);
    assert!(plan(&issues).is_empty());
}
