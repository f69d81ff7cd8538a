// Round-up with last-person reconciliation
use rust_decimal::Decimal;
use shared::models::PersonSummary;

/// Smallest multiple of `unit` that is `>= value`.
pub fn round_up(value: Decimal, unit: Decimal) -> Decimal {
    (value / unit).ceil() * unit
}

/// Rounds every person but the last up to `unit`; the last person absorbs the
/// difference so that the rounded totals add up to the unrounded grand totals.
///
/// The last person's amount is not clamped. With many people, a tiny bill and
/// a large unit it can end up zero or negative.
pub fn reconcile(summaries: &mut [PersonSummary], unit: Decimal) {
    let Some((last, others)) = summaries.split_last_mut() else {
        return;
    };

    let actual_total: Decimal =
        others.iter().map(|s| s.grand_total).sum::<Decimal>() + last.grand_total;

    for summary in others.iter_mut() {
        summary.rounded_total = round_up(summary.grand_total, unit);
    }
    let sum_of_others: Decimal = others.iter().map(|s| s.rounded_total).sum();

    last.rounded_total = actual_total - sum_of_others;
}
