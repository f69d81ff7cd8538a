// Bill allocation: subtotals, surcharges, tip and rounding per person
pub mod distribution;
pub mod rounding;
pub mod subtotal;

use shared::models::{Bill, BillSummary, PersonSummary};

/// Splits a bill snapshot into one summary per person, in the bill's people order.
///
/// 1. subtotal: each shared item's line total divided by its sharer count
/// 2. VAT and service charge on the person's own subtotal, tip by subtotal proportion
///    (tip split evenly when nobody has a subtotal)
/// 3. optional round-up, with the last person absorbing the residual so the rounded
///    totals add up exactly to the unrounded ones
///
/// Pure and total: no I/O and no errors. Inputs are validated by the caller.
pub fn calculate(bill: &Bill) -> Vec<PersonSummary> {
    if bill.people.is_empty() {
        return Vec::new();
    }

    let subtotals = subtotal::person_subtotals(bill);
    let mut summaries = distribution::distribute(bill, &subtotals);

    if let Some(unit) = bill.rounding.unit() {
        rounding::reconcile(&mut summaries, unit);
    }

    tracing::debug!(
        bill_id = %bill.id,
        people = bill.people.len(),
        items = bill.items.len(),
        rounding = ?bill.rounding,
        "Calculated bill allocation"
    );
    summaries
}

/// `calculate` plus the bill total shown to users (sum of rounded totals).
pub fn summarize(bill: &Bill) -> BillSummary {
    BillSummary::new(calculate(bill))
}
