//! Integer money math.
//!
//! Amounts are `i128` in the token's smallest unit. Splits round down for the
//! receiving share so `share + rest == total` always holds and no unit is
//! created or lost.

/// Basis-point denominator (1 bp = 0.01%).
pub const BASIS_POINTS: u32 = 10_000;

/// Convert a whole-token amount to the token's smallest unit.
///
/// `to_base_units(10, 6)` is ten units of a 6-decimal stablecoin.
/// Returns `None` on overflow.
pub fn to_base_units(amount: i128, decimals: u32) -> Option<i128> {
    let factor = 10_i128.checked_pow(decimals)?;
    amount.checked_mul(factor)
}

/// Split `total` into `(share, rest)` where
/// `share = floor(total * share_bps / BASIS_POINTS)`.
///
/// Returns `None` for a negative total, a share above 100%, or overflow.
pub fn split_bps(total: i128, share_bps: u32) -> Option<(i128, i128)> {
    if total < 0 || share_bps > BASIS_POINTS {
        return None;
    }
    let share = total
        .checked_mul(share_bps as i128)?
        .checked_div(BASIS_POINTS as i128)?;
    Some((share, total - share))
}
