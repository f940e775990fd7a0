use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use varejo_core::{DomainError, DomainResult, InstallmentId, Money};

/// A deferred-payment record.
///
/// Agreements reference customers and products by free text and are not
/// linked transactionally to sales, products, or accounts — they are a
/// standalone book kept next to the ledgers. `term` is the agreed number
/// of installments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentAgreement {
    pub id: InstallmentId,
    pub customer: String,
    pub product: String,
    pub amount: Money,
    pub term: u32,
    pub paid: bool,
    pub recorded_at: DateTime<Utc>,
}

/// The book of installment agreements.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InstallmentBook {
    agreements: Vec<InstallmentAgreement>,
}

impl InstallmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the book from persisted rows, preserving row order.
    pub fn from_rows(rows: Vec<InstallmentAgreement>) -> Self {
        Self { agreements: rows }
    }

    pub fn agreements(&self) -> &[InstallmentAgreement] {
        &self.agreements
    }

    pub fn len(&self) -> usize {
        self.agreements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agreements.is_empty()
    }

    pub fn get(&self, id: InstallmentId) -> Option<&InstallmentAgreement> {
        self.agreements.iter().find(|a| a.id == id)
    }

    /// Append an agreement. No referential checks are made against
    /// products, accounts, or sales.
    pub fn register(
        &mut self,
        customer: &str,
        product: &str,
        amount: Money,
        term: u32,
        already_paid: bool,
    ) -> DomainResult<&InstallmentAgreement> {
        let customer = customer.trim();
        if customer.is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        if amount.is_negative() {
            return Err(DomainError::validation("amount cannot be negative"));
        }
        if term == 0 {
            return Err(DomainError::validation("term must be at least 1"));
        }

        self.agreements.push(InstallmentAgreement {
            id: InstallmentId::new(),
            customer: customer.to_string(),
            product: product.trim().to_string(),
            amount,
            term,
            paid: already_paid,
            recorded_at: Utc::now(),
        });
        let idx = self.agreements.len() - 1;
        Ok(&self.agreements[idx])
    }

    /// Agreements still awaiting payment.
    pub fn outstanding(&self) -> Vec<&InstallmentAgreement> {
        self.agreements.iter().filter(|a| !a.paid).collect()
    }

    /// Complete an agreement's lifecycle. Marking an already-paid
    /// agreement again is a no-op success.
    pub fn mark_paid(&mut self, id: InstallmentId) -> DomainResult<()> {
        let agreement = self
            .agreements
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(DomainError::NotFound)?;
        agreement.paid = true;
        Ok(())
    }
}
