use anchor_lang::prelude::*;

use crate::constants::{BASE_MULTIPLIER, PROOF_MULTIPLIER, TICKET_BUNDLES, WEIGHT_SCALE};
use crate::error::LotteryError;

pub fn multiplier(proof_verified: bool) -> u64 {
    if proof_verified {
        PROOF_MULTIPLIER
    } else {
        BASE_MULTIPLIER
    }
}

/// floor(tickets * multiplier), computed in fixed point.
///
/// Always derived from the ticket count; never feed a previous weight back in.
pub fn effective_weight(tickets: u64, proof_verified: bool) -> Result<u64> {
    let scaled = u128::from(tickets)
        .checked_mul(u128::from(multiplier(proof_verified)))
        .ok_or(LotteryError::MathOverflow)?;
    u64::try_from(scaled / u128::from(WEIGHT_SCALE)).map_err(|_| error!(LotteryError::MathOverflow))
}

/// Price of a bundle of `ticket_count` tickets, rejecting unknown bundles.
pub fn bundle_price(ticket_count: u64, ticket_price: u64) -> Result<u64> {
    require!(
        TICKET_BUNDLES.contains(&ticket_count),
        LotteryError::InvalidTicketBundle
    );
    ticket_price
        .checked_mul(ticket_count)
        .ok_or_else(|| error!(LotteryError::MathOverflow))
}

/// Checks bundle, payment and the per-wallet cap for one purchase.
pub fn validate_purchase(
    ticket_count: u64,
    payment: u64,
    ticket_price: u64,
    already_wagered: u64,
    max_wager_per_wallet: u64,
) -> Result<()> {
    let price = bundle_price(ticket_count, ticket_price)?;
    require!(payment == price, LotteryError::IncorrectPayment);

    let wagered = already_wagered
        .checked_add(payment)
        .ok_or(LotteryError::MathOverflow)?;
    require!(
        wagered <= max_wager_per_wallet,
        LotteryError::WagerCapExceeded
    );
    Ok(())
}
