//! Built-in standard chart for new pharmacies.
//!
//! Seeded in one bulk operation; parents are listed before their children
//! so the store can create them in order.

use super::account::AccountType;

/// One account in the standard chart.
#[derive(Debug, Clone, Copy)]
pub struct StandardAccountDef {
    /// Account name.
    pub name: &'static str,
    /// Account classification.
    pub account_type: AccountType,
    /// Name of the parent account, which must appear earlier in the list.
    pub parent: Option<&'static str>,
}

const STANDARD_CHART: &[StandardAccountDef] = &[
    // Assets
    StandardAccountDef {
        name: "Cash",
        account_type: AccountType::Asset,
        parent: None,
    },
    StandardAccountDef {
        name: "Bank Account",
        account_type: AccountType::Asset,
        parent: None,
    },
    StandardAccountDef {
        name: "Accounts Receivable",
        account_type: AccountType::Asset,
        parent: None,
    },
    StandardAccountDef {
        name: "Inventory",
        account_type: AccountType::Asset,
        parent: None,
    },
    StandardAccountDef {
        name: "Prescription Stock",
        account_type: AccountType::Asset,
        parent: Some("Inventory"),
    },
    StandardAccountDef {
        name: "Over-the-Counter Stock",
        account_type: AccountType::Asset,
        parent: Some("Inventory"),
    },
    StandardAccountDef {
        name: "Equipment",
        account_type: AccountType::Asset,
        parent: None,
    },
    // Liabilities
    StandardAccountDef {
        name: "Accounts Payable",
        account_type: AccountType::Liability,
        parent: None,
    },
    StandardAccountDef {
        name: "Accrued Expenses",
        account_type: AccountType::Liability,
        parent: None,
    },
    StandardAccountDef {
        name: "Sales Tax Payable",
        account_type: AccountType::Liability,
        parent: None,
    },
    // Equity
    StandardAccountDef {
        name: "Owner Capital",
        account_type: AccountType::Equity,
        parent: None,
    },
    StandardAccountDef {
        name: "Retained Earnings",
        account_type: AccountType::Equity,
        parent: None,
    },
    // Revenue
    StandardAccountDef {
        name: "Sales Revenue",
        account_type: AccountType::Revenue,
        parent: None,
    },
    StandardAccountDef {
        name: "Prescription Sales",
        account_type: AccountType::Revenue,
        parent: Some("Sales Revenue"),
    },
    StandardAccountDef {
        name: "Over-the-Counter Sales",
        account_type: AccountType::Revenue,
        parent: Some("Sales Revenue"),
    },
    StandardAccountDef {
        name: "Service Revenue",
        account_type: AccountType::Revenue,
        parent: None,
    },
    // Expenses
    StandardAccountDef {
        name: "Cost of Goods Sold",
        account_type: AccountType::Expense,
        parent: None,
    },
    StandardAccountDef {
        name: "Salaries Expense",
        account_type: AccountType::Expense,
        parent: None,
    },
    StandardAccountDef {
        name: "Rent Expense",
        account_type: AccountType::Expense,
        parent: None,
    },
    StandardAccountDef {
        name: "Utilities Expense",
        account_type: AccountType::Expense,
        parent: None,
    },
    StandardAccountDef {
        name: "Supplies Expense",
        account_type: AccountType::Expense,
        parent: None,
    },
];

/// Returns the standard chart, parents before children.
#[must_use]
pub fn standard_chart() -> &'static [StandardAccountDef] {
    STANDARD_CHART
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = standard_chart().iter().map(|def| def.name).collect();
        assert_eq!(names.len(), standard_chart().len());
    }

    #[test]
    fn test_parents_precede_children() {
        let mut seen: HashSet<&str> = HashSet::new();
        for def in standard_chart() {
            if let Some(parent) = def.parent {
                assert!(seen.contains(parent), "parent '{parent}' must come first");
            }
            seen.insert(def.name);
        }
    }

    #[test]
    fn test_children_share_parent_type() {
        for def in standard_chart() {
            if let Some(parent) = def.parent {
                let parent_def = standard_chart()
                    .iter()
                    .find(|d| d.name == parent)
                    .expect("parent exists");
                assert_eq!(parent_def.account_type, def.account_type);
            }
        }
    }

    #[test]
    fn test_every_type_present() {
        for account_type in AccountType::ALL {
            assert!(
                standard_chart()
                    .iter()
                    .any(|def| def.account_type == account_type),
                "missing {account_type} accounts"
            );
        }
    }
}
