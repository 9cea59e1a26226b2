use anchor_lang::prelude::*;

use crate::constants::{FULFILLMENT_TIMEOUT_SECS, RANDOMNESS_COOLDOWN_SECS};
use crate::error::LotteryError;
use crate::state::{Round, RoundStatus};

/// Enforces the global gap between randomness requests.
/// `last_request_at == 0` means no request was ever made.
pub fn ensure_cooldown_elapsed(last_request_at: i64, now: i64) -> Result<()> {
    if last_request_at == 0 {
        return Ok(());
    }
    let elapsed = now
        .checked_sub(last_request_at)
        .ok_or(LotteryError::MathOverflow)?;
    require!(
        elapsed >= RANDOMNESS_COOLDOWN_SECS,
        LotteryError::RandomnessCooldown
    );
    Ok(())
}

fn fulfillment_deadline(round: &Round) -> Result<i64> {
    round
        .requested_at
        .checked_add(FULFILLMENT_TIMEOUT_SECS)
        .ok_or_else(|| error!(LotteryError::MathOverflow))
}

pub fn ensure_request_allowed(round: &Round, last_request_at: i64, now: i64) -> Result<()> {
    round.require_status(RoundStatus::Snapshot)?;
    require!(round.total_tickets > 0, LotteryError::RoundHasNoTickets);
    ensure_cooldown_elapsed(last_request_at, now)
}

/// A re-request is operator recovery for a round whose pending request
/// can no longer be fulfilled.
pub fn ensure_rerequest_allowed(round: &Round, last_request_at: i64, now: i64) -> Result<()> {
    round.require_status(RoundStatus::VrfRequested)?;
    require!(
        now > fulfillment_deadline(round)?,
        LotteryError::RequestNotExpired
    );
    ensure_cooldown_elapsed(last_request_at, now)
}

/// Checks a fulfillment before anything is written. Fails closed: on error
/// the round stays in `VrfRequested` untouched.
pub fn validate_fulfillment(
    round: &Round,
    caller: Pubkey,
    provider: Pubkey,
    request_id: Pubkey,
    randomness: &[u8; 32],
    now: i64,
) -> Result<()> {
    require_keys_eq!(caller, provider, LotteryError::UnauthorizedProvider);
    round.require_status(RoundStatus::VrfRequested)?;
    require_keys_eq!(request_id, round.request_id, LotteryError::RequestIdMismatch);
    require!(
        now <= fulfillment_deadline(round)?,
        LotteryError::StaleFulfillment
    );
    require!(*randomness != [0u8; 32], LotteryError::ZeroRandomness);
    Ok(())
}
