// In-memory bill storage: bills, people, items and the item-person share edges
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{
    Bill, BillId, BillListEntry, Extras, Item, ItemId, Person, PersonId,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use uuid::Uuid;

use crate::config::ValidationLimits;
use crate::data::validation::{self, NewItem, NewPerson};
use crate::error::{EngineError, Result};

struct StoredItem {
    name: String,
    price: Decimal,
    quantity: u32,
}

struct StoredBill {
    title: String,
    created_at: DateTime<Utc>,
    // Insertion sequence, breaks created_at ties when listing.
    seq: u64,
    extras: Extras,
    people: BTreeMap<PersonId, Person>,
    items: BTreeMap<ItemId, StoredItem>,
    // Share edges. Removing a person or an item removes its edges too.
    shares: BTreeSet<(ItemId, PersonId)>,
}

impl StoredBill {
    fn sharers_of(&self, item_id: ItemId) -> Vec<PersonId> {
        self.shares
            .range((item_id, PersonId::MIN)..=(item_id, PersonId::MAX))
            .map(|(_, person_id)| *person_id)
            .collect()
    }
}

pub struct BillStore {
    limits: ValidationLimits,
    bills: HashMap<BillId, StoredBill>,
    next_id: u64,
    next_seq: u64,
}

impl BillStore {
    pub fn new(limits: ValidationLimits) -> Self {
        BillStore {
            limits,
            bills: HashMap::new(),
            next_id: 1,
            next_seq: 0,
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn bill(&self, bill_id: &BillId) -> Result<&StoredBill> {
        self.bills
            .get(bill_id)
            .ok_or_else(|| EngineError::NotFound(format!("Bill '{}' not found", bill_id)))
    }

    fn bill_mut(&mut self, bill_id: &BillId) -> Result<&mut StoredBill> {
        self.bills
            .get_mut(bill_id)
            .ok_or_else(|| EngineError::NotFound(format!("Bill '{}' not found", bill_id)))
    }

    /// New bills start with no surcharges, no tip and rounding off.
    pub fn create_bill(&mut self, title: &str) -> Result<BillId> {
        let title = validation::validate_title(title, &self.limits)?;
        let id = Uuid::new_v4();
        let seq = self.next_seq;
        self.next_seq += 1;

        self.bills.insert(
            id,
            StoredBill {
                title,
                created_at: Utc::now(),
                seq,
                extras: Extras::default(),
                people: BTreeMap::new(),
                items: BTreeMap::new(),
                shares: BTreeSet::new(),
            },
        );
        tracing::debug!(bill_id = %id, "Created bill");
        Ok(id)
    }

    /// Newest first.
    pub fn list_bills(&self) -> Vec<BillListEntry> {
        let mut bills: Vec<(&BillId, &StoredBill)> = self.bills.iter().collect();
        bills.sort_by(|(_, a), (_, b)| (b.created_at, b.seq).cmp(&(a.created_at, a.seq)));
        bills
            .into_iter()
            .map(|(id, bill)| BillListEntry {
                id: *id,
                title: bill.title.clone(),
                created_at: bill.created_at,
                people_count: bill.people.len(),
                item_count: bill.items.len(),
            })
            .collect()
    }

    pub fn delete_bill(&mut self, bill_id: &BillId) -> Result<()> {
        self.bills
            .remove(bill_id)
            .map(|_| ())
            .ok_or_else(|| EngineError::NotFound(format!("Bill '{}' not found", bill_id)))
    }

    /// Names are unique per bill, ignoring case.
    pub fn add_person(&mut self, bill_id: &BillId, person: &NewPerson) -> Result<Person> {
        let person = validation::validate_person(person, &self.limits)?;

        let lowered = person.name.to_lowercase();
        if self.bill(bill_id)?.people.values().any(|p| p.name.to_lowercase() == lowered) {
            return Err(EngineError::Conflict(format!(
                "Name \"{}\" already exists in this bill",
                person.name
            )));
        }

        let id = self.allocate_id();
        let person = Person { id, name: person.name, instagram: person.instagram };
        self.bill_mut(bill_id)?.people.insert(id, person.clone());
        tracing::debug!(bill_id = %bill_id, person_id = id, "Added person");
        Ok(person)
    }

    /// Removes the person and every share edge pointing at them.
    pub fn delete_person(&mut self, bill_id: &BillId, person_id: PersonId) -> Result<()> {
        let bill = self.bill_mut(bill_id)?;
        if bill.people.remove(&person_id).is_none() {
            return Err(EngineError::NotFound(format!(
                "Person {} not found in bill '{}'",
                person_id, bill_id
            )));
        }
        let before = bill.shares.len();
        bill.shares.retain(|(_, sharer)| *sharer != person_id);
        tracing::debug!(
            bill_id = %bill_id,
            person_id,
            removed_shares = before - bill.shares.len(),
            "Deleted person"
        );
        Ok(())
    }

    /// Every sharer must already be a person of the bill.
    pub fn add_item(&mut self, bill_id: &BillId, item: &NewItem) -> Result<Item> {
        let item = validation::validate_item(item, &self.limits)?;

        let people = &self.bill(bill_id)?.people;
        if let Some(stranger) = item.sharer_ids.iter().find(|sharer| !people.contains_key(*sharer)) {
            return Err(EngineError::ValidationError(format!(
                "Person {} is not part of this bill",
                stranger
            )));
        }

        let id = self.allocate_id();
        let bill = self.bill_mut(bill_id)?;
        bill.items.insert(
            id,
            StoredItem { name: item.name.clone(), price: item.price, quantity: item.quantity },
        );
        for person_id in &item.sharer_ids {
            bill.shares.insert((id, *person_id));
        }
        let sharer_ids = bill.sharers_of(id);
        tracing::debug!(bill_id = %bill_id, item_id = id, sharers = sharer_ids.len(), "Added item");

        Ok(Item { id, name: item.name, price: item.price, quantity: item.quantity, sharer_ids })
    }

    /// Removes the item together with its share edges.
    pub fn delete_item(&mut self, bill_id: &BillId, item_id: ItemId) -> Result<()> {
        let bill = self.bill_mut(bill_id)?;
        if bill.items.remove(&item_id).is_none() {
            return Err(EngineError::NotFound(format!(
                "Item {} not found in bill '{}'",
                item_id, bill_id
            )));
        }
        bill.shares.retain(|(item, _)| *item != item_id);
        tracing::debug!(bill_id = %bill_id, item_id, "Deleted item");
        Ok(())
    }

    pub fn update_extras(&mut self, bill_id: &BillId, extras: &Extras) -> Result<()> {
        validation::validate_extras(extras, &self.limits)?;
        let bill = self.bill_mut(bill_id)?;
        bill.extras = *extras;
        Ok(())
    }

    /// Consistent copy of a bill for the allocator, people and items ordered by id.
    pub fn snapshot(&self, bill_id: &BillId) -> Result<Bill> {
        let stored = self.bill(bill_id)?;

        let mut bill = Bill::new(stored.title.clone());
        bill.id = *bill_id;
        bill.created_at = stored.created_at;
        bill.apply_extras(&stored.extras);
        bill.people = stored.people.values().cloned().collect();
        bill.items = stored
            .items
            .iter()
            .map(|(id, item)| Item {
                id: *id,
                name: item.name.clone(),
                price: item.price,
                quantity: item.quantity,
                sharer_ids: stored.sharers_of(*id),
            })
            .collect();
        Ok(bill)
    }
}

impl Default for BillStore {
    fn default() -> Self {
        Self::new(ValidationLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::RoundingMode;

    fn new_person(name: &str) -> NewPerson {
        NewPerson { name: name.to_string(), instagram: None }
    }

    fn new_item(name: &str, price: i64, sharer_ids: Vec<PersonId>) -> NewItem {
        NewItem { name: name.to_string(), price: Decimal::from(price), quantity: 1, sharer_ids }
    }

    fn store_with_bill() -> (BillStore, BillId) {
        let mut store = BillStore::default();
        let bill_id = store.create_bill("Lunch").unwrap();
        (store, bill_id)
    }

    #[test]
    fn test_create_bill_defaults() {
        let (store, bill_id) = store_with_bill();
        let bill = store.snapshot(&bill_id).unwrap();
        assert_eq!(bill.title, "Lunch");
        assert_eq!(bill.vat_percent, Decimal::ZERO);
        assert_eq!(bill.tip_amount, Decimal::ZERO);
        assert_eq!(bill.rounding, RoundingMode::None);
        assert!(bill.people.is_empty());
    }

    #[test]
    fn test_create_bill_rejects_blank_title() {
        let mut store = BillStore::default();
        assert!(matches!(store.create_bill("  "), Err(EngineError::ValidationError(_))));
    }

    #[test]
    fn test_list_bills_newest_first_with_counts() {
        let mut store = BillStore::default();
        let first = store.create_bill("First").unwrap();
        let second = store.create_bill("Second").unwrap();
        let person = store.add_person(&first, &new_person("Ann")).unwrap();
        store.add_item(&first, &new_item("Rice", 10, vec![person.id])).unwrap();

        let bills = store.list_bills();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].id, second);
        assert_eq!(bills[1].id, first);
        assert_eq!(bills[1].people_count, 1);
        assert_eq!(bills[1].item_count, 1);
    }

    #[test]
    fn test_duplicate_name_is_conflict_ignoring_case() {
        let (mut store, bill_id) = store_with_bill();
        store.add_person(&bill_id, &new_person("Ploy")).unwrap();
        let err = store.add_person(&bill_id, &new_person(" ploy ")).unwrap_err();
        assert!(matches!(err, EngineError::Conflict(_)));
        assert!(err.to_string().contains("\"ploy\" already exists"));
    }

    #[test]
    fn test_same_name_allowed_in_other_bill() {
        let mut store = BillStore::default();
        let a = store.create_bill("A").unwrap();
        let b = store.create_bill("B").unwrap();
        store.add_person(&a, &new_person("Ploy")).unwrap();
        assert!(store.add_person(&b, &new_person("Ploy")).is_ok());
    }

    #[test]
    fn test_add_item_rejects_unknown_sharer() {
        let (mut store, bill_id) = store_with_bill();
        let ann = store.add_person(&bill_id, &new_person("Ann")).unwrap();
        let err = store.add_item(&bill_id, &new_item("Tea", 5, vec![ann.id, 999])).unwrap_err();
        assert!(err.to_string().contains("Person 999 is not part of this bill"));
        assert!(store.snapshot(&bill_id).unwrap().items.is_empty());
    }

    #[test]
    fn test_rejected_requests_do_not_consume_ids() {
        let (mut store, bill_id) = store_with_bill();
        let ann = store.add_person(&bill_id, &new_person("Ann")).unwrap();
        assert!(store.add_person(&bill_id, &new_person("ann")).is_err());
        assert!(store.add_person(&Uuid::new_v4(), &new_person("Bo")).is_err());
        assert!(store.add_item(&bill_id, &new_item("Tea", 5, vec![999])).is_err());

        let bo = store.add_person(&bill_id, &new_person("Bo")).unwrap();
        assert_eq!(bo.id, ann.id + 1);
        let item = store.add_item(&bill_id, &new_item("Tea", 5, vec![bo.id])).unwrap();
        assert_eq!(item.id, bo.id + 1);
    }

    #[test]
    fn test_add_item_rejects_overflowing_total() {
        let (mut store, bill_id) = store_with_bill();
        let ann = store.add_person(&bill_id, &new_person("Ann")).unwrap();
        let item = NewItem { name: "Caviar".to_string(), price: Decimal::MAX, quantity: 2, sharer_ids: vec![ann.id] };
        assert!(matches!(store.add_item(&bill_id, &item), Err(EngineError::ValidationError(_))));

        let bill = store.snapshot(&bill_id).unwrap();
        assert!(bill.items.is_empty());
        assert_eq!(crate::allocator::summarize(&bill).bill_total, Decimal::ZERO);
    }

    #[test]
    fn test_delete_person_cascades_shares() {
        let (mut store, bill_id) = store_with_bill();
        let ann = store.add_person(&bill_id, &new_person("Ann")).unwrap();
        let bo = store.add_person(&bill_id, &new_person("Bo")).unwrap();
        let item = store.add_item(&bill_id, &new_item("Pizza", 20, vec![ann.id, bo.id])).unwrap();
        assert_eq!(item.sharer_ids, vec![ann.id, bo.id]);

        store.delete_person(&bill_id, bo.id).unwrap();
        let bill = store.snapshot(&bill_id).unwrap();
        assert_eq!(bill.people.len(), 1);
        assert_eq!(bill.items[0].sharer_ids, vec![ann.id]);
    }

    #[test]
    fn test_delete_item_cascades_shares() {
        let (mut store, bill_id) = store_with_bill();
        let ann = store.add_person(&bill_id, &new_person("Ann")).unwrap();
        let item = store.add_item(&bill_id, &new_item("Pizza", 20, vec![ann.id])).unwrap();
        store.delete_item(&bill_id, item.id).unwrap();
        let bill = store.snapshot(&bill_id).unwrap();
        assert!(bill.items.is_empty());
        assert!(matches!(store.delete_item(&bill_id, item.id), Err(EngineError::NotFound(_))));
    }

    #[test]
    fn test_update_extras_validated() {
        let (mut store, bill_id) = store_with_bill();
        let extras = Extras {
            vat_percent: Decimal::from(7),
            service_percent: Decimal::from(10),
            tip_amount: Decimal::from(20),
            rounding: RoundingMode::Round10,
        };
        store.update_extras(&bill_id, &extras).unwrap();
        assert_eq!(store.snapshot(&bill_id).unwrap().extras(), extras);

        let bad = Extras { vat_percent: Decimal::from(150), ..extras };
        assert!(store.update_extras(&bill_id, &bad).is_err());
        assert_eq!(store.snapshot(&bill_id).unwrap().extras(), extras);
    }

    #[test]
    fn test_snapshot_orders_by_id() {
        let (mut store, bill_id) = store_with_bill();
        let names = ["Cee", "Ann", "Bo"];
        for name in names {
            store.add_person(&bill_id, &new_person(name)).unwrap();
        }
        let bill = store.snapshot(&bill_id).unwrap();
        let got: Vec<&str> = bill.people.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(got, names);
        assert!(bill.people.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_unknown_bill_is_not_found() {
        let mut store = BillStore::default();
        let missing = Uuid::new_v4();
        assert!(matches!(store.snapshot(&missing), Err(EngineError::NotFound(_))));
        assert!(matches!(store.delete_bill(&missing), Err(EngineError::NotFound(_))));
        assert!(matches!(
            store.add_person(&missing, &new_person("Ann")),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_bill() {
        let (mut store, bill_id) = store_with_bill();
        store.delete_bill(&bill_id).unwrap();
        assert!(store.list_bills().is_empty());
    }
}
