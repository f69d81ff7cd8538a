// Per-person subtotal attribution
use rust_decimal::Decimal;
use shared::models::{Bill, ItemId, PersonId};
use std::collections::{HashMap, HashSet};

/// Distinct sharers of every item, restricted to people of the bill.
///
/// Duplicate share edges count once and edges pointing at unknown people are
/// dropped, so an item's sharer count is always the number of people who
/// actually split it.
pub fn item_sharers(bill: &Bill) -> HashMap<ItemId, Vec<PersonId>> {
    let known: HashSet<PersonId> = bill.people.iter().map(|p| p.id).collect();

    bill.items
        .iter()
        .map(|item| {
            let mut seen = HashSet::with_capacity(item.sharer_ids.len());
            let sharers = item
                .sharer_ids
                .iter()
                .copied()
                .filter(|id| known.contains(id) && seen.insert(*id))
                .collect();
            (item.id, sharers)
        })
        .collect()
}

/// Sum of `line_total / sharer_count` over every item a person shares.
/// Every person of the bill gets an entry, zero when they share nothing.
pub fn person_subtotals(bill: &Bill) -> HashMap<PersonId, Decimal> {
    let mut subtotals: HashMap<PersonId, Decimal> =
        bill.people.iter().map(|p| (p.id, Decimal::ZERO)).collect();
    let sharers_by_item = item_sharers(bill);

    for item in &bill.items {
        let sharers = match sharers_by_item.get(&item.id) {
            Some(sharers) if !sharers.is_empty() => sharers,
            _ => continue, // unshared items belong to nobody
        };
        let portion = item.line_total() / Decimal::from(sharers.len());
        for person_id in sharers {
            if let Some(subtotal) = subtotals.get_mut(person_id) {
                *subtotal += portion;
            }
        }
    }

    subtotals
}
