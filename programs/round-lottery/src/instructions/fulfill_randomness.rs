use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::{CONFIG_SEED, ROUND_SEED, VAULT_SEED};
use crate::error::LotteryError;
use crate::events::{FeesDistributed, WinnersCommitted};
use crate::instructions::participant_set::{entrants, load_participants, participants_root};
use crate::merkle::{merkle_root, winner_leaf};
use crate::randomness::validate_fulfillment;
use crate::selection::select_winners;
use crate::state::{Config, Round, RoundEvent};
use crate::vault;

/// Accounts required to deliver randomness for a pending round.
///
/// This ensures that:
/// 1. Only the configured randomness provider can fulfill.
/// 2. The randomness account is the one bound at request time.
/// 3. The fee recipient is the configured one.
#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct FulfillRandomness<'info> {
    /// Randomness provider identity; checked against the config in the handler.
    pub provider: Signer<'info>,

    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    /// The randomness oracle account providing verifiable randomness.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,

    #[account(mut, seeds = [VAULT_SEED], bump = config.vault_bump)]
    pub vault: SystemAccount<'info>,

    /// CHECK: only receives lamports; address pinned to the config.
    #[account(mut, address = config.fee_recipient)]
    pub fee_recipient: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Consumes the randomness for `request_id` and settles the round.
///
/// Steps:
/// 1. Validate caller, request id, timeout and value; any failure leaves the
///    round untouched in `VrfRequested`.
/// 2. Re-derive the participants root from the passed set and compare it with
///    the committed one.
/// 3. Select winners and commit the winners root.
/// 4. Mark the round distributed and book the fee split.
/// 5. Pay the fee recipient.
///
/// Remaining accounts: every participant of the round, sorted by wallet.
pub fn process_fulfill_randomness<'info>(
    ctx: Context<'_, '_, 'info, 'info, FulfillRandomness<'info>>,
    _round_id: u64,
    request_id: Pubkey,
    randomness: [u8; 32],
) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.config;
    let round = &mut ctx.accounts.round;

    validate_fulfillment(
        round,
        ctx.accounts.provider.key(),
        config.randomness_provider,
        request_id,
        &randomness,
        clock.unix_timestamp,
    )?;
    require_keys_eq!(
        ctx.accounts.randomness_account_data.key(),
        request_id,
        LotteryError::RequestIdMismatch
    );

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| LotteryError::InvalidRandomnessData)?;
    let revealed_random_value = randomness_data
        .get_value(&clock)
        .map_err(|_| LotteryError::RandomnessNotResolved)?;
    require!(
        revealed_random_value == randomness,
        LotteryError::RandomnessValueMismatch
    );

    let participants = load_participants(round, ctx.remaining_accounts)?;
    require!(
        participants_root(&participants) == round.participants_root,
        LotteryError::ParticipantsRootMismatch
    );

    let winners = select_winners(
        &randomness,
        &entrants(&participants),
        round.selection_mode,
        request_id,
    )?;
    let leaves: Vec<[u8; 32]> = winners
        .iter()
        .map(|w| winner_leaf(&w.wallet, w.prize_tier, w.slot_index))
        .collect();

    round.seed = randomness;
    round.winners_root = merkle_root(&leaves);
    round.winners = winners;
    round.transition(RoundEvent::Fulfill)?;

    msg!("Round {} winners: {}", round.id, round.winners.len());
    emit!(WinnersCommitted {
        round_id: round.id,
        request_id,
        seed: round.seed,
        winners_root: round.winners_root,
        winner_count: round.winners.len() as u8,
    });

    // effects before the payout
    let (fee_amount, rollover_amount) = round.fee_split()?;
    round.fees_distributed = true;
    config.rollover_balance = config
        .rollover_balance
        .checked_add(rollover_amount)
        .ok_or(LotteryError::MathOverflow)?;
    config.latest_round_settled = round.status.is_terminal();

    msg!(
        "Fees: {} to {}, {} rolled over",
        fee_amount,
        config.fee_recipient,
        rollover_amount
    );
    emit!(FeesDistributed {
        round_id: round.id,
        fee_recipient: config.fee_recipient,
        fee_amount,
        rollover_amount,
    });

    if fee_amount > 0 {
        vault::pay_out(
            &ctx.accounts.system_program,
            &ctx.accounts.vault,
            &ctx.accounts.fee_recipient.to_account_info(),
            config.vault_bump,
            fee_amount,
        )?;
    }
    Ok(())
}
