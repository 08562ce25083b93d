use std::collections::HashMap;

use crate::models::{AccountRef, CategoryRef, NormalizedRow, ResolvedTransaction};

/// Resolve free-text account/category names against the existing entities
/// by case-insensitive exact match. Pure data in, data out; the caller
/// persists the result.
///
/// An unresolved account falls back to the first available account so one
/// unknown name never fails the whole import; an unresolved category is
/// left unset (categories are optional). Unresolved transfer endpoints are
/// also left unset, which loses the counterparty name; callers should
/// surface that to the user.
pub fn reconcile(
    accounts: &[AccountRef],
    categories: &[CategoryRef],
    rows: &[NormalizedRow],
) -> Vec<ResolvedTransaction> {
    let account_ids: HashMap<String, i64> = accounts
        .iter()
        .map(|a| (a.name.to_lowercase(), a.id))
        .collect();
    let category_ids: HashMap<String, i64> = categories
        .iter()
        .map(|c| (c.name.to_lowercase(), c.id))
        .collect();
    let default_account = accounts.first().map(|a| a.id);

    let account_id = |name: &Option<String>| {
        name.as_deref()
            .and_then(|n| account_ids.get(&n.to_lowercase()).copied())
    };

    rows.iter()
        .map(|row| ResolvedTransaction {
            kind: row.kind,
            date: row.date.clone(),
            amount: row.amount,
            description: row.description.clone(),
            notes: row.notes.clone(),
            account_id: account_id(&row.account).or(default_account),
            category_id: row
                .category
                .as_deref()
                .and_then(|n| category_ids.get(&n.to_lowercase()).copied()),
            from_account_id: account_id(&row.from_account),
            to_account_id: account_id(&row.to_account),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TxnKind;

    fn accounts() -> Vec<AccountRef> {
        vec![
            AccountRef { id: 1, name: "Checking".to_string() },
            AccountRef { id: 2, name: "Savings".to_string() },
        ]
    }

    fn categories() -> Vec<CategoryRef> {
        vec![CategoryRef {
            id: 10,
            name: "Food & Dining".to_string(),
            kind: "expense".to_string(),
            color: None,
        }]
    }

    fn row(kind: TxnKind) -> NormalizedRow {
        NormalizedRow {
            date: "2025-11-01".to_string(),
            kind,
            amount: 45.50,
            description: "Grocery shopping".to_string(),
            category: None,
            account: None,
            from_account: None,
            to_account: None,
            notes: None,
        }
    }

    #[test]
    fn test_names_match_case_insensitive() {
        let mut r = row(TxnKind::Expense);
        r.account = Some("CHECKING".to_string());
        r.category = Some("food & dining".to_string());
        let resolved = reconcile(&accounts(), &categories(), &[r]);
        assert_eq!(resolved[0].account_id, Some(1));
        assert_eq!(resolved[0].category_id, Some(10));
    }

    #[test]
    fn test_unresolved_account_falls_back_to_first() {
        let mut r = row(TxnKind::Expense);
        r.account = Some("No Such Account".to_string());
        let resolved = reconcile(&accounts(), &categories(), &[r.clone()]);
        assert_eq!(resolved[0].account_id, Some(1));

        // Absent account name gets the same fallback.
        r.account = None;
        let resolved = reconcile(&accounts(), &categories(), &[r]);
        assert_eq!(resolved[0].account_id, Some(1));
    }

    #[test]
    fn test_no_accounts_means_no_fallback() {
        let resolved = reconcile(&[], &categories(), &[row(TxnKind::Expense)]);
        assert_eq!(resolved[0].account_id, None);
    }

    #[test]
    fn test_unresolved_category_left_unset() {
        let mut r = row(TxnKind::Expense);
        r.category = Some("Gardening".to_string());
        let resolved = reconcile(&accounts(), &categories(), &[r]);
        assert_eq!(resolved[0].category_id, None);
    }

    #[test]
    fn test_transfer_endpoints_resolve_or_stay_unset() {
        let mut r = row(TxnKind::Transfer);
        r.from_account = Some("checking".to_string());
        r.to_account = Some("Brokerage".to_string());
        let resolved = reconcile(&accounts(), &categories(), &[r]);
        assert_eq!(resolved[0].from_account_id, Some(1));
        assert_eq!(resolved[0].to_account_id, None);
    }

    #[test]
    fn test_output_preserves_order_and_fields() {
        let rows = vec![row(TxnKind::Expense), row(TxnKind::Income)];
        let resolved = reconcile(&accounts(), &categories(), &rows);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].kind, TxnKind::Expense);
        assert_eq!(resolved[1].kind, TxnKind::Income);
        assert_eq!(resolved[0].amount, 45.50);
        assert_eq!(resolved[0].date, "2025-11-01");
    }
}
