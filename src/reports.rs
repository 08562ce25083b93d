use chrono::Datelike;

use crate::models::{CategorySlice, EnrichedTransaction, ReportData, ReportSummary, TxnKind};

const UNCATEGORIZED: &str = "Uncategorized";
const DEFAULT_COLOR: &str = "#64748b";

// ---------------------------------------------------------------------------
// Period helpers
// ---------------------------------------------------------------------------

pub fn parse_month(s: &str) -> Option<(i32, u32)> {
    let (y, m) = s.split_once('-')?;
    let year = y.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month))
}

pub fn current_month() -> (i32, u32) {
    let now = chrono::Local::now();
    (now.year(), now.month())
}

/// Inclusive first/last day of a month as YYYY-MM-DD strings.
pub fn month_bounds(year: i32, month: u32) -> (String, String) {
    let last_day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if chrono::NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    };
    (
        format!("{year:04}-{month:02}-01"),
        format!("{year:04}-{month:02}-{last_day:02}"),
    )
}

/// Display label for a month period, e.g. "November 2025".
pub fn month_label(year: i32, month: u32) -> String {
    match chrono::NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date.format("%B %Y").to_string(),
        None => format!("{year:04}-{month:02}"),
    }
}

// ---------------------------------------------------------------------------
// Report data
// ---------------------------------------------------------------------------

/// Aggregate enriched transactions into report data: summary totals, an
/// expense-by-category breakdown, and the transaction list passed through
/// in input order (callers fetch newest-first). Transfers count toward the
/// transaction total but neither income nor expense sums.
pub fn build_report_data(transactions: Vec<EnrichedTransaction>, period: String) -> ReportData {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut slices: Vec<CategorySlice> = Vec::new();

    for t in &transactions {
        match t.kind {
            TxnKind::Income => total_income += t.amount,
            TxnKind::Expense => {
                total_expense += t.amount;
                let name = t
                    .category
                    .clone()
                    .unwrap_or_else(|| UNCATEGORIZED.to_string());
                match slices.iter_mut().find(|s| s.name == name) {
                    Some(slice) => slice.value += t.amount,
                    None => slices.push(CategorySlice {
                        name,
                        value: t.amount,
                        color: t
                            .category_color
                            .clone()
                            .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
                    }),
                }
            }
            TxnKind::Transfer => {}
        }
    }

    ReportData {
        period,
        summary: ReportSummary {
            net_income: total_income - total_expense,
            total_income,
            total_expense,
            transaction_count: transactions.len(),
        },
        category_data: slices,
        transactions,
    }
}

/// The top `limit` categories by descending value, each with its share of
/// total expenses as a percentage. An all-zero-expense period yields 0.0%
/// for every row rather than NaN.
pub fn top_categories(data: &ReportData, limit: usize) -> Vec<(String, f64, f64)> {
    let mut slices = data.category_data.clone();
    slices.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    slices.truncate(limit);

    let total = data.summary.total_expense;
    slices
        .into_iter()
        .map(|s| {
            let pct = if total > 0.0 { s.value / total * 100.0 } else { 0.0 };
            (s.name, s.value, pct)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(kind: TxnKind, amount: f64, category: Option<&str>) -> EnrichedTransaction {
        EnrichedTransaction {
            date: "2025-11-01".to_string(),
            kind,
            amount,
            description: "test".to_string(),
            category: category.map(str::to_string),
            category_color: None,
            account: None,
            from_account: None,
            to_account: None,
            notes: None,
        }
    }

    #[test]
    fn test_summary_totals() {
        let data = build_report_data(
            vec![
                txn(TxnKind::Income, 3500.0, None),
                txn(TxnKind::Expense, 45.5, Some("Food")),
                txn(TxnKind::Expense, 54.5, Some("Food")),
                txn(TxnKind::Transfer, 500.0, None),
            ],
            "November 2025".to_string(),
        );
        assert_eq!(data.summary.total_income, 3500.0);
        assert_eq!(data.summary.total_expense, 100.0);
        assert_eq!(data.summary.net_income, 3400.0);
        assert_eq!(data.summary.transaction_count, 4);
    }

    #[test]
    fn test_category_breakdown_groups_and_falls_back() {
        let data = build_report_data(
            vec![
                txn(TxnKind::Expense, 30.0, Some("Food")),
                txn(TxnKind::Expense, 20.0, Some("Food")),
                txn(TxnKind::Expense, 10.0, None),
            ],
            String::new(),
        );
        assert_eq!(data.category_data.len(), 2);
        assert_eq!(data.category_data[0].name, "Food");
        assert_eq!(data.category_data[0].value, 50.0);
        assert_eq!(data.category_data[1].name, "Uncategorized");
        assert_eq!(data.category_data[1].color, "#64748b");
    }

    #[test]
    fn test_top_categories_sorts_and_caps() {
        let txns: Vec<_> = (0..15)
            .map(|i| {
                let name = format!("cat{i}");
                txn(TxnKind::Expense, (i + 1) as f64, Some(name.as_str()))
            })
            .collect();
        let data = build_report_data(txns, String::new());
        let top = top_categories(&data, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].0, "cat14");
        assert_eq!(top[0].1, 15.0);
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_zero_expense_percentages_are_zero() {
        let mut data = build_report_data(vec![], String::new());
        data.category_data = vec![
            CategorySlice { name: "a".to_string(), value: 0.0, color: "#000".to_string() },
            CategorySlice { name: "b".to_string(), value: 0.0, color: "#000".to_string() },
        ];
        let top = top_categories(&data, 10);
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|(_, _, pct)| *pct == 0.0));
    }

    #[test]
    fn test_percentages_sum_for_simple_split() {
        let data = build_report_data(
            vec![
                txn(TxnKind::Expense, 75.0, Some("a")),
                txn(TxnKind::Expense, 25.0, Some("b")),
            ],
            String::new(),
        );
        let top = top_categories(&data, 10);
        assert_eq!(top[0].2, 75.0);
        assert_eq!(top[1].2, 25.0);
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(2025, 11),
            ("2025-11-01".to_string(), "2025-11-30".to_string())
        );
        assert_eq!(month_bounds(2024, 2).1, "2024-02-29");
        assert_eq!(month_bounds(2025, 2).1, "2025-02-28");
        assert_eq!(month_bounds(2025, 12).1, "2025-12-31");
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-11"), Some((2025, 11)));
        assert_eq!(parse_month("2025-13"), None);
        assert_eq!(parse_month("november"), None);
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(2025, 11), "November 2025");
    }
}
