//! Tiered discount over cumulative sales quantity.

/// Maps a partner's total sold quantity to a discount percentage.
///
/// Tiers are closed on the lower bound and open on the upper: exactly 10 000
/// earns 5%, exactly 50 000 earns 10%, exactly 300 000 earns 15%. Negative
/// totals cannot come out of the store, but fall into the 0% tier anyway.
pub fn compute_discount(total_sales: i64) -> i32 {
    if total_sales < 10_000 {
        0
    } else if total_sales < 50_000 {
        5
    } else if total_sales < 300_000 {
        10
    } else {
        15
    }
}
