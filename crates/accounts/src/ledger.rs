use serde::{Deserialize, Serialize};

use varejo_core::{DomainError, DomainResult, Money};

/// Named running balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub balance: Money,
}

/// Account ledger: insertion-ordered accounts keyed by unique name.
///
/// The ledger is pure in-memory state. Persisting the snapshot after a
/// mutation is the caller's responsibility, which keeps every operation
/// here deterministic and side-effect free.
///
/// Debits go through [`AccountLedger::debit_if_sufficient`], which couples
/// the balance check and the debit in one step; a balance can never go
/// negative through that path. [`AccountLedger::apply_delta`] keeps the
/// original signed-delta contract (including create-on-absent) for credits.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AccountLedger {
    accounts: Vec<Account>,
}

impl AccountLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the ledger from persisted rows, preserving row order.
    pub fn from_rows(rows: Vec<Account>) -> Self {
        Self { accounts: rows }
    }

    /// All accounts in insertion order (the persistence order).
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.name == name)
    }

    pub fn balance(&self, name: &str) -> Option<Money> {
        self.get(name).map(|a| a.balance)
    }

    /// Whether `name` exists and holds at least `amount`.
    pub fn has_sufficient(&self, name: &str, amount: Money) -> bool {
        self.balance(name).is_some_and(|b| b >= amount)
    }

    /// Register a new account with a non-negative opening balance.
    pub fn register(&mut self, name: &str, opening_balance: Money) -> DomainResult<&Account> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("account name cannot be empty"));
        }
        if opening_balance.is_negative() {
            return Err(DomainError::validation("opening balance cannot be negative"));
        }
        if self.get(name).is_some() {
            return Err(DomainError::duplicate_account(name));
        }

        self.accounts.push(Account {
            name: name.to_string(),
            balance: opening_balance,
        });
        let idx = self.accounts.len() - 1;
        Ok(&self.accounts[idx])
    }

    /// Apply a signed delta to an account's balance.
    ///
    /// An absent account is created holding the delta (the first-deposit
    /// contract). No lower bound is enforced here; debits that must not
    /// overdraw go through [`AccountLedger::debit_if_sufficient`].
    pub fn apply_delta(&mut self, name: &str, delta: Money) {
        match self.get_mut(name) {
            Some(account) => account.balance += delta,
            None => self.accounts.push(Account {
                name: name.to_string(),
                balance: delta,
            }),
        }
    }

    /// Debit `amount` from `name` only if the balance covers it.
    ///
    /// Check and debit are a single operation, so no caller can interleave
    /// between them.
    pub fn debit_if_sufficient(&mut self, name: &str, amount: Money) -> DomainResult<()> {
        let account = self.get_mut(name).ok_or(DomainError::NotFound)?;
        if account.balance < amount {
            return Err(DomainError::InsufficientFunds(account.name.clone()));
        }
        account.balance -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn money(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    #[test]
    fn register_adds_account_with_opening_balance() {
        let mut ledger = AccountLedger::new();
        let account = ledger.register("Caixa", money(100_000)).unwrap();
        assert_eq!(account.name, "Caixa");
        assert_eq!(account.balance, money(100_000));
        assert_eq!(ledger.balance("Caixa"), Some(money(100_000)));
    }

    #[test]
    fn register_trims_and_rejects_blank_names() {
        let mut ledger = AccountLedger::new();
        ledger.register("  Caixa  ", money(0)).unwrap();
        assert!(ledger.get("Caixa").is_some());

        let err = ledger.register("   ", money(0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn register_rejects_duplicate_name() {
        let mut ledger = AccountLedger::new();
        ledger.register("Caixa", money(0)).unwrap();
        let err = ledger.register("Caixa", money(500)).unwrap_err();
        assert_eq!(err, DomainError::DuplicateAccount("Caixa".to_string()));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.balance("Caixa"), Some(money(0)));
    }

    #[test]
    fn register_rejects_negative_opening_balance() {
        let mut ledger = AccountLedger::new();
        let err = ledger.register("Caixa", money(-1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn apply_delta_creates_absent_account_with_delta() {
        let mut ledger = AccountLedger::new();
        ledger.apply_delta("Pix", money(2_500));
        assert_eq!(ledger.balance("Pix"), Some(money(2_500)));

        ledger.apply_delta("Pix", money(-500));
        assert_eq!(ledger.balance("Pix"), Some(money(2_000)));
    }

    #[test]
    fn has_sufficient_is_false_for_absent_account() {
        let ledger = AccountLedger::new();
        assert!(!ledger.has_sufficient("Caixa", money(1)));
    }

    #[test]
    fn has_sufficient_compares_against_balance() {
        let mut ledger = AccountLedger::new();
        ledger.register("Caixa", money(1_000)).unwrap();
        assert!(ledger.has_sufficient("Caixa", money(1_000)));
        assert!(!ledger.has_sufficient("Caixa", money(1_001)));
    }

    #[test]
    fn debit_if_sufficient_debits_in_one_step() {
        let mut ledger = AccountLedger::new();
        ledger.register("Caixa", money(1_000)).unwrap();
        ledger.debit_if_sufficient("Caixa", money(400)).unwrap();
        assert_eq!(ledger.balance("Caixa"), Some(money(600)));
    }

    #[test]
    fn debit_if_sufficient_rejects_overdraw_without_mutation() {
        let mut ledger = AccountLedger::new();
        ledger.register("Caixa", money(1_000)).unwrap();
        let err = ledger.debit_if_sufficient("Caixa", money(1_001)).unwrap_err();
        assert_eq!(err, DomainError::InsufficientFunds("Caixa".to_string()));
        assert_eq!(ledger.balance("Caixa"), Some(money(1_000)));
    }

    #[test]
    fn debit_if_sufficient_rejects_absent_account() {
        let mut ledger = AccountLedger::new();
        let err = ledger.debit_if_sufficient("Caixa", money(1)).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn from_rows_preserves_row_order() {
        let rows = vec![
            Account { name: "B".to_string(), balance: money(1) },
            Account { name: "A".to_string(), balance: money(2) },
        ];
        let ledger = AccountLedger::from_rows(rows.clone());
        assert_eq!(ledger.accounts(), rows.as_slice());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: with credits via `apply_delta` and debits only via
        /// `debit_if_sufficient`, a registered balance never goes negative.
        #[test]
        fn guarded_debits_never_overdraw(
            ops in prop::collection::vec((prop::bool::ANY, 1i64..100_000i64), 1..50)
        ) {
            let mut ledger = AccountLedger::new();
            ledger.register("Caixa", Money::ZERO).unwrap();

            for (is_credit, amount) in ops {
                let amount = Money::from_cents(amount);
                if is_credit {
                    ledger.apply_delta("Caixa", amount);
                } else {
                    // Rejection is fine; overdraw is not.
                    let _ = ledger.debit_if_sufficient("Caixa", amount);
                }
                let balance = ledger.balance("Caixa").unwrap();
                prop_assert!(!balance.is_negative());
            }
        }

        /// Property: `apply_delta` totals match plain summation per account.
        #[test]
        fn apply_delta_is_additive(
            deltas in prop::collection::vec(-100_000i64..100_000i64, 1..50)
        ) {
            let mut ledger = AccountLedger::new();
            for d in &deltas {
                ledger.apply_delta("Caixa", Money::from_cents(*d));
            }
            let expected: i64 = deltas.iter().sum();
            prop_assert_eq!(ledger.balance("Caixa"), Some(Money::from_cents(expected)));
        }
    }
}
