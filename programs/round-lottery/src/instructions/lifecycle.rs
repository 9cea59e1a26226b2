use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, MAX_CID_LEN, ROUND_SEED};
use crate::error::LotteryError;
use crate::events::{
    ManifestPublished, RoundClosed, RoundCreated, RoundOpened, RoundRefunded, SnapshotCommitted,
};
use crate::instructions::participant_set::{credit_refunds, load_participants, participants_root};
use crate::state::{Config, Round, RoundEvent, RoundStatus};

/// Accounts required to create the next round.
#[derive(Accounts)]
pub struct CreateRound<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ LotteryError::Unauthorized,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        init,
        payer = authority,
        space = 8 + Round::INIT_SPACE,
        seeds = [ROUND_SEED, config.round_counter.to_le_bytes().as_ref()],
        bump
    )]
    pub round: Box<Account<'info, Round>>,

    pub system_program: Program<'info, System>,
}

/// Creates round `config.round_counter`. The previous round must be settled.
pub fn process_create_round(ctx: Context<CreateRound>, opens_at: i64, closes_at: i64) -> Result<()> {
    require!(opens_at < closes_at, LotteryError::InvalidRoundWindow);

    let config = &mut ctx.accounts.config;
    require!(
        config.latest_round_settled,
        LotteryError::PreviousRoundActive
    );

    let round = &mut ctx.accounts.round;
    round.bump = ctx.bumps.round;
    round.id = config.round_counter;
    round.status = RoundStatus::Created;
    round.opens_at = opens_at;
    round.closes_at = closes_at;
    round.carried_over = config.take_rollover();
    round.selection_mode = config.selection_mode;

    config.round_counter = config
        .round_counter
        .checked_add(1)
        .ok_or(LotteryError::MathOverflow)?;
    config.latest_round_settled = false;

    msg!("Round {} created", round.id);
    emit!(RoundCreated {
        round_id: round.id,
        opens_at,
        closes_at,
        carried_over: round.carried_over,
    });
    Ok(())
}

/// Accounts shared by owner-driven transitions on an existing round.
#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct RoundTransition<'info> {
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
}

pub fn process_open_round(ctx: Context<RoundTransition>, _round_id: u64) -> Result<()> {
    let round = &mut ctx.accounts.round;
    round.transition(RoundEvent::Open)?;

    msg!("Round {} open", round.id);
    emit!(RoundOpened { round_id: round.id });
    Ok(())
}

/// Closes ticket sales. Below the ticket threshold the round is refunded in
/// the same step; remaining accounts then carry `(participant, refund_balance)`
/// pairs for every participant, sorted by wallet.
pub fn process_close_round<'info>(
    ctx: Context<'_, '_, 'info, 'info, RoundTransition<'info>>,
    _round_id: u64,
) -> Result<()> {
    let round = &mut ctx.accounts.round;
    let config = &mut ctx.accounts.config;

    match round.transition(RoundEvent::Close)? {
        RoundStatus::Refunded => {
            let total_refunded = credit_refunds(round, ctx.remaining_accounts)?;
            config.rollover_balance = config
                .rollover_balance
                .checked_add(round.carried_over)
                .ok_or(LotteryError::MathOverflow)?;
            config.latest_round_settled = round.status.is_terminal();

            msg!(
                "Round {} refunded: {} tickets below threshold, {} lamports credited",
                round.id,
                round.total_tickets,
                total_refunded
            );
            emit!(RoundRefunded {
                round_id: round.id,
                total_tickets: round.total_tickets,
                total_refunded,
                participant_count: round.participant_count,
            });
        }
        _ => {
            msg!("Round {} closed with {} tickets", round.id, round.total_tickets);
            emit!(RoundClosed {
                round_id: round.id,
                total_tickets: round.total_tickets,
                total_weight: round.total_weight,
                participant_count: round.participant_count,
            });
        }
    }
    Ok(())
}

/// Freezes the participant set and commits its Merkle root.
/// Remaining accounts: every participant of the round, sorted by wallet.
pub fn process_snapshot_round<'info>(
    ctx: Context<'_, '_, 'info, 'info, RoundTransition<'info>>,
    _round_id: u64,
) -> Result<()> {
    let round = &mut ctx.accounts.round;
    round.require_status(RoundStatus::Closed)?;
    require!(
        round.total_weight >= round.total_tickets,
        LotteryError::ParticipantSetMismatch
    );

    let participants = load_participants(round, ctx.remaining_accounts)?;
    round.participants_root = participants_root(&participants);
    round.selection_mode = ctx.accounts.config.selection_mode;
    round.transition(RoundEvent::Snapshot)?;

    msg!("Round {} snapshot: {} participants", round.id, participants.len());
    emit!(SnapshotCommitted {
        round_id: round.id,
        participants_root: round.participants_root,
        total_tickets: round.total_tickets,
        total_weight: round.total_weight,
        participant_count: round.participant_count,
        selection_mode: round.selection_mode,
    });
    Ok(())
}

/// Records where the participants and winners files were published.
pub fn process_publish_manifest(
    ctx: Context<RoundTransition>,
    _round_id: u64,
    participants_cid: String,
    winners_cid: String,
) -> Result<()> {
    require!(
        participants_cid.len() <= MAX_CID_LEN && winners_cid.len() <= MAX_CID_LEN,
        LotteryError::ContentIdTooLong
    );

    let round = &mut ctx.accounts.round;
    require!(
        !matches!(round.status, RoundStatus::Created | RoundStatus::Open | RoundStatus::Closed),
        LotteryError::InvalidRoundStatus
    );
    if !winners_cid.is_empty() {
        round.require_status(RoundStatus::Distributed)?;
    }

    round.participants_cid = participants_cid.clone();
    round.winners_cid = winners_cid.clone();

    msg!(
        "Round {} manifest: participants {}, winners {}",
        round.id,
        participants_cid,
        winners_cid
    );
    emit!(ManifestPublished {
        round_id: round.id,
        participants_cid,
        winners_cid,
    });
    Ok(())
}
