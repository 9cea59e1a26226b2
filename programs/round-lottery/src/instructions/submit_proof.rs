use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, DENYLIST_SEED, PARTICIPANT_SEED, PUZZLE_PROOF_SEED, ROUND_SEED};
use crate::error::LotteryError;
use crate::events::ProofSubmitted;
use crate::state::{ensure_not_denied, Config, Participant, PuzzleProof, Round, RoundStatus};

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct SubmitProof<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    /// Must already exist: proofs are only accepted from ticket holders.
    #[account(
        mut,
        seeds = [PARTICIPANT_SEED, round_id.to_le_bytes().as_ref(), payer.key().as_ref()],
        bump = participant.bump,
        constraint = participant.tickets > 0 @ LotteryError::NoTicketsHeld,
    )]
    pub participant: Box<Account<'info, Participant>>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + PuzzleProof::INIT_SPACE,
        seeds = [PUZZLE_PROOF_SEED, round_id.to_le_bytes().as_ref(), payer.key().as_ref()],
        bump
    )]
    pub puzzle_proof: Box<Account<'info, PuzzleProof>>,

    /// CHECK: address pinned by seeds; contents read by `ensure_not_denied`.
    #[account(seeds = [DENYLIST_SEED, payer.key().as_ref()], bump)]
    pub denylist_entry: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Accepts a puzzle proof once per (round, wallet) and applies the 1.4x boost.
pub fn process_submit_proof(
    ctx: Context<SubmitProof>,
    round_id: u64,
    proof_hash: [u8; 32],
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let payer = ctx.accounts.payer.key();

    ctx.accounts.config.ensure_not_paused()?;
    ensure_not_denied(&ctx.accounts.denylist_entry)?;

    let round = &mut ctx.accounts.round;
    round.require_status(RoundStatus::Open)?;

    PuzzleProof::screen(&proof_hash, &payer)?;

    let puzzle_proof = &mut ctx.accounts.puzzle_proof;
    puzzle_proof.accept(proof_hash, now)?;
    puzzle_proof.bump = ctx.bumps.puzzle_proof;
    puzzle_proof.round_id = round_id;
    puzzle_proof.wallet = payer;

    let participant = &mut ctx.accounts.participant;
    let change = participant.mark_proof_verified()?;
    round.apply_weight_change(&change, 0, 0)?;

    msg!(
        "Proof accepted for {} in round {}: weight {} -> {}",
        payer,
        round_id,
        change.old_weight,
        change.new_weight
    );
    emit!(ProofSubmitted {
        round_id,
        wallet: payer,
        proof_hash,
        old_weight: change.old_weight,
        new_weight: change.new_weight,
        total_weight: round.total_weight,
    });
    Ok(())
}
