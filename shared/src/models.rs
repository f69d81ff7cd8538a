use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type BillId = Uuid;
pub type PersonId = u64;
pub type ItemId = u64;

/// Per-person round-up policy. The discriminant is the denomination.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub enum RoundingMode {
    #[default]
    None,
    Round1,
    Round5,
    Round10,
}

impl RoundingMode {
    /// Denomination to round up to, `None` when rounding is off.
    pub fn unit(self) -> Option<Decimal> {
        match self {
            RoundingMode::None => None,
            RoundingMode::Round1 => Some(Decimal::ONE),
            RoundingMode::Round5 => Some(Decimal::from(5)),
            RoundingMode::Round10 => Some(Decimal::TEN),
        }
    }
}

impl From<RoundingMode> for u32 {
    fn from(mode: RoundingMode) -> Self {
        match mode {
            RoundingMode::None => 0,
            RoundingMode::Round1 => 1,
            RoundingMode::Round5 => 5,
            RoundingMode::Round10 => 10,
        }
    }
}

impl TryFrom<u32> for RoundingMode {
    type Error = UnknownRoundingUnit;

    fn try_from(unit: u32) -> Result<Self, Self::Error> {
        match unit {
            0 => Ok(RoundingMode::None),
            1 => Ok(RoundingMode::Round1),
            5 => Ok(RoundingMode::Round5),
            10 => Ok(RoundingMode::Round10),
            other => Err(UnknownRoundingUnit(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownRoundingUnit(pub u32);

impl fmt::Display for UnknownRoundingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rounding unit {} (expected 0, 1, 5 or 10)", self.0)
    }
}

impl std::error::Error for UnknownRoundingUnit {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    // Share edges, one entry per sharer.
    pub sharer_ids: Vec<PersonId>,
}

impl Item {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Surcharges, tip and rounding policy of a bill.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Extras {
    pub vat_percent: Decimal,
    pub service_percent: Decimal,
    pub tip_amount: Decimal,
    pub rounding: RoundingMode,
}

/// Fully loaded bill snapshot as consumed by the allocator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: BillId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub vat_percent: Decimal,
    pub service_percent: Decimal,
    pub tip_amount: Decimal,
    pub rounding: RoundingMode,
    pub people: Vec<Person>,
    pub items: Vec<Item>,
}

impl Bill {
    pub fn new(title: impl Into<String>) -> Self {
        Bill {
            id: Uuid::new_v4(),
            title: title.into(),
            created_at: Utc::now(),
            vat_percent: Decimal::ZERO,
            service_percent: Decimal::ZERO,
            tip_amount: Decimal::ZERO,
            rounding: RoundingMode::None,
            people: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn extras(&self) -> Extras {
        Extras {
            vat_percent: self.vat_percent,
            service_percent: self.service_percent,
            tip_amount: self.tip_amount,
            rounding: self.rounding,
        }
    }

    pub fn apply_extras(&mut self, extras: &Extras) {
        self.vat_percent = extras.vat_percent;
        self.service_percent = extras.service_percent;
        self.tip_amount = extras.tip_amount;
        self.rounding = extras.rounding;
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonSummary {
    pub person_id: PersonId,
    pub name: String,
    pub subtotal: Decimal,
    pub vat_share: Decimal,
    pub service_share: Decimal,
    pub tip_share: Decimal,
    pub grand_total: Decimal,
    pub rounded_total: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BillSummary {
    pub summaries: Vec<PersonSummary>,
    /// Sum of every `rounded_total`, the amount shown as the bill's total.
    pub bill_total: Decimal,
}

impl BillSummary {
    pub fn new(summaries: Vec<PersonSummary>) -> Self {
        let bill_total = summaries.iter().map(|s| s.rounded_total).sum();
        BillSummary { summaries, bill_total }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillListEntry {
    pub id: BillId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub people_count: usize,
    pub item_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDetails {
    pub id: ItemId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub total: Decimal,
    pub sharer_ids: Vec<PersonId>,
    /// Sharer names, sorted.
    pub shared_with: Vec<String>,
}

/// Everything a bill page or API response shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillDetails {
    pub id: BillId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub extras: Extras,
    pub people: Vec<Person>,
    pub items: Vec<ItemDetails>,
    pub summaries: Vec<PersonSummary>,
    pub bill_total: Decimal,
}
