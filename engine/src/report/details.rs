// Bill details view: metadata, items with their sharers, and the calculated summaries
use shared::models::{Bill, BillDetails, Item, ItemDetails};

use crate::allocator;
use crate::error::Result;

/// An item with its line total and the sorted names of its sharers.
pub fn item_details(item: &Item, bill: &Bill) -> ItemDetails {
    let mut shared_with: Vec<String> = item
        .sharer_ids
        .iter()
        .filter_map(|id| bill.person(*id).map(|p| p.name.clone()))
        .collect();
    shared_with.sort();
    ItemDetails {
        id: item.id,
        name: item.name.clone(),
        price: item.price,
        quantity: item.quantity,
        total: item.line_total(),
        sharer_ids: item.sharer_ids.clone(),
        shared_with,
    }
}

pub fn bill_details(bill: &Bill) -> BillDetails {
    let summary = allocator::summarize(bill);
    let items = bill.items.iter().map(|item| item_details(item, bill)).collect();

    BillDetails {
        id: bill.id,
        title: bill.title.clone(),
        created_at: bill.created_at,
        extras: bill.extras(),
        people: bill.people.clone(),
        items,
        summaries: summary.summaries,
        bill_total: summary.bill_total,
    }
}

pub fn bill_details_json(bill: &Bill) -> Result<String> {
    Ok(serde_json::to_string_pretty(&bill_details(bill))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{Person, RoundingMode};
    use std::str::FromStr;

    fn sample_bill() -> Bill {
        let mut bill = Bill::new("Dinner");
        bill.people = vec![
            Person { id: 1, name: "Zed".to_string(), instagram: Some("zed.eats".to_string()) },
            Person { id: 2, name: "Amy".to_string(), instagram: None },
        ];
        bill.items = vec![Item {
            id: 3,
            name: "Hotpot".to_string(),
            price: Decimal::from(50),
            quantity: 2,
            sharer_ids: vec![1, 2],
        }];
        bill.vat_percent = Decimal::from(7);
        bill.service_percent = Decimal::from(10);
        bill.rounding = RoundingMode::Round10;
        bill
    }

    #[test]
    fn test_details_items_and_totals() {
        let details = bill_details(&sample_bill());
        assert_eq!(details.items[0].total, Decimal::from(100));
        assert_eq!(details.items[0].sharer_ids, vec![1, 2]);
        assert_eq!(details.items[0].shared_with, vec!["Amy", "Zed"]);
        assert_eq!(details.summaries.len(), 2);
        assert_eq!(details.summaries[0].rounded_total, Decimal::from(60));
        assert_eq!(details.summaries[1].rounded_total, Decimal::from(57));
        assert_eq!(details.bill_total, Decimal::from(117));
    }

    #[test]
    fn test_details_json_shape() {
        let json = bill_details_json(&sample_bill()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Dinner");
        assert_eq!(value["extras"]["rounding"], 10);
        assert_eq!(value["items"][0]["shared_with"][1], "Zed");
        assert_eq!(value["people"][0]["instagram"], "zed.eats");
        // Decimals travel as strings; compare by value, not by scale.
        let decimal_at = |v: &serde_json::Value| Decimal::from_str(v.as_str().unwrap()).unwrap();
        assert_eq!(decimal_at(&value["summaries"][0]["grand_total"]), Decimal::new(585, 1));
        assert_eq!(decimal_at(&value["bill_total"]), Decimal::from(117));
    }
}
