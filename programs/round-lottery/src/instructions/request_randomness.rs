use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::{CONFIG_SEED, ROUND_SEED};
use crate::error::LotteryError;
use crate::events::{RandomnessRequested, RandomnessRerequested};
use crate::randomness::{ensure_request_allowed, ensure_rerequest_allowed};
use crate::state::{Config, Round, RoundEvent};

/// Accounts required to bind a randomness request to a round.
///
/// Ensures:
/// 1. Only the authority of the lottery can request randomness.
/// 2. The randomness account was committed in the previous slot and has not
///    been revealed yet.
#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct RequestRandomness<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ LotteryError::Unauthorized,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    /// Randomness account from Switchboard; its key becomes the request id.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

/// Checks that the Switchboard account is freshly committed and records it
/// as the round's pending request.
fn bind_request(accounts: &mut RequestRandomness, clock: &Clock) -> Result<()> {
    let randomness_data =
        RandomnessAccountData::parse(accounts.randomness_account_data.data.borrow())
            .map_err(|_| LotteryError::InvalidRandomnessData)?;

    if randomness_data.seed_slot != clock.slot.saturating_sub(1) {
        msg!(
            "Seed slot: {}, current slot: {}",
            randomness_data.seed_slot,
            clock.slot
        );
        return err!(LotteryError::RandomnessAlreadyRevealed);
    }

    accounts.round.request_id = accounts.randomness_account_data.key();
    accounts.round.requested_at = clock.unix_timestamp;
    accounts.config.last_request_at = clock.unix_timestamp;
    Ok(())
}

pub fn process_request_randomness(ctx: Context<RequestRandomness>, _round_id: u64) -> Result<()> {
    let clock = Clock::get()?;
    ensure_request_allowed(
        &ctx.accounts.round,
        ctx.accounts.config.last_request_at,
        clock.unix_timestamp,
    )?;

    bind_request(ctx.accounts, &clock)?;
    let round = &mut ctx.accounts.round;
    round.transition(RoundEvent::RequestRandomness)?;

    msg!("Round {} randomness requested: {}", round.id, round.request_id);
    emit!(RandomnessRequested {
        round_id: round.id,
        request_id: round.request_id,
        requested_at: round.requested_at,
    });
    Ok(())
}

/// Operator recovery for a round stuck in `VrfRequested` past the
/// fulfillment timeout. Binds a new request; the stale one can no longer
/// be fulfilled because its id no longer matches.
pub fn process_rerequest_randomness(
    ctx: Context<RequestRandomness>,
    _round_id: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    ensure_rerequest_allowed(
        &ctx.accounts.round,
        ctx.accounts.config.last_request_at,
        clock.unix_timestamp,
    )?;

    let stale_request_id = ctx.accounts.round.request_id;
    bind_request(ctx.accounts, &clock)?;
    let round = &ctx.accounts.round;

    msg!(
        "Round {} randomness re-requested: {} replaces {}",
        round.id,
        round.request_id,
        stale_request_id
    );
    emit!(RandomnessRerequested {
        round_id: round.id,
        stale_request_id,
        request_id: round.request_id,
        requested_at: round.requested_at,
    });
    Ok(())
}
