// Proportional VAT, service charge and tip distribution
use rust_decimal::Decimal;
use shared::models::{Bill, PersonId, PersonSummary};
use std::collections::HashMap;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Builds one summary per person, in bill order, with surcharges and tip
/// attached and `rounded_total` still equal to `grand_total`.
pub fn distribute(bill: &Bill, subtotals: &HashMap<PersonId, Decimal>) -> Vec<PersonSummary> {
    let people_count = Decimal::from(bill.people.len());
    let total_subtotal: Decimal = bill
        .people
        .iter()
        .map(|p| subtotals.get(&p.id).copied().unwrap_or_default())
        .sum();

    bill.people
        .iter()
        .map(|person| {
            let subtotal = subtotals.get(&person.id).copied().unwrap_or_default();

            let (vat_share, service_share, tip_share) = if total_subtotal > Decimal::ZERO {
                let proportion = subtotal / total_subtotal;
                (
                    subtotal * bill.vat_percent / HUNDRED,
                    subtotal * bill.service_percent / HUNDRED,
                    bill.tip_amount * proportion,
                )
            } else {
                // Nothing to be proportional to: no surcharges, tip split evenly.
                (Decimal::ZERO, Decimal::ZERO, bill.tip_amount / people_count)
            };

            let grand_total = subtotal + vat_share + service_share + tip_share;
            PersonSummary {
                person_id: person.id,
                name: person.name.clone(),
                subtotal,
                vat_share,
                service_share,
                tip_share,
                grand_total,
                rounded_total: grand_total,
            }
        })
        .collect()
}
