use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::constants::{CLAIM_SEED, CONFIG_SEED, DENYLIST_SEED, PRIZE_SCHEDULE, ROUND_SEED, VAULT_SEED};
use crate::error::LotteryError;
use crate::events::PrizeClaimed;
use crate::merkle::{verify_proof, winner_leaf};
use crate::state::{ensure_not_denied, ClaimRecord, Config, Round, RoundStatus};

/// Accounts required for claiming a prize slot.
///
/// Ensures:
/// 1. The round has been distributed.
/// 2. The caller proves, against the winners root, that it won the slot.
/// 3. The slot has not been claimed before.
/// 4. Prize tokens move from the vault only after the claim is recorded.
#[derive(Accounts)]
#[instruction(round_id: u64, slot_index: u8)]
pub struct ClaimPrize<'info> {
    #[account(mut)]
    pub claimer: Signer<'info>,

    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, Config>>,

    #[account(
        seeds = [ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    #[account(
        init_if_needed,
        payer = claimer,
        space = 8 + ClaimRecord::INIT_SPACE,
        seeds = [CLAIM_SEED, round_id.to_le_bytes().as_ref(), [slot_index].as_ref()],
        bump
    )]
    pub claim_record: Box<Account<'info, ClaimRecord>>,

    /// CHECK: address pinned by seeds; contents read by `ensure_not_denied`.
    #[account(seeds = [DENYLIST_SEED, claimer.key().as_ref()], bump)]
    pub denylist_entry: UncheckedAccount<'info>,

    /// Authority of the prize vault.
    #[account(seeds = [VAULT_SEED], bump = config.vault_bump)]
    pub vault: SystemAccount<'info>,

    #[account(address = config.prize_mint)]
    pub prize_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        associated_token::mint = prize_mint,
        associated_token::authority = vault,
        associated_token::token_program = token_program,
    )]
    pub prize_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = claimer,
        associated_token::mint = prize_mint,
        associated_token::authority = claimer,
        associated_token::token_program = token_program,
    )]
    pub destination: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// Checks the slot against the committed schedule and the winners root.
pub fn verify_claim(
    round: &Round,
    claimer: &Pubkey,
    slot_index: u8,
    prize_tier: u8,
    proof: &[[u8; 32]],
) -> Result<()> {
    round.require_status(RoundStatus::Distributed)?;
    let scheduled_tier = PRIZE_SCHEDULE
        .get(usize::from(slot_index))
        .ok_or(LotteryError::InvalidSlotIndex)?;
    require!(
        *scheduled_tier == prize_tier,
        LotteryError::PrizeTierMismatch
    );

    let leaf = winner_leaf(claimer, prize_tier, slot_index);
    require!(
        verify_proof(leaf, proof, &round.winners_root),
        LotteryError::InvalidMerkleProof
    );
    Ok(())
}

/// Processes the prize claim for one slot.
///
/// Steps:
/// 1. Check pause and deny-list.
/// 2. Verify the Merkle proof for (caller, tier, slot).
/// 3. Mark the slot claimed; a second claim fails here.
/// 4. Transfer the tier's prize amount to the caller.
pub fn process_claim_prize(
    ctx: Context<ClaimPrize>,
    round_id: u64,
    slot_index: u8,
    prize_tier: u8,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let claimer = ctx.accounts.claimer.key();
    let config = &ctx.accounts.config;

    config.ensure_not_paused()?;
    ensure_not_denied(&ctx.accounts.denylist_entry)?;
    verify_claim(&ctx.accounts.round, &claimer, slot_index, prize_tier, &proof)?;

    let claim_record = &mut ctx.accounts.claim_record;
    claim_record.mark_claimed(claimer, now)?;
    claim_record.bump = ctx.bumps.claim_record;
    claim_record.round_id = round_id;
    claim_record.slot_index = slot_index;

    let amount = config.prize_amount(prize_tier)?;
    msg!(
        "Round {} slot {} (tier {}) claimed by {}: {}",
        round_id,
        slot_index,
        prize_tier,
        claimer,
        amount
    );
    emit!(PrizeClaimed {
        round_id,
        slot_index,
        prize_tier,
        claimer,
        amount,
        timestamp: now,
    });

    if amount > 0 {
        let signer_seeds: &[&[&[u8]]] = &[&[VAULT_SEED, &[config.vault_bump]]];
        transfer_checked(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.prize_vault.to_account_info(),
                    mint: ctx.accounts.prize_mint.to_account_info(),
                    to: ctx.accounts.destination.to_account_info(),
                    authority: ctx.accounts.vault.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
            ctx.accounts.prize_mint.decimals,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::{build_proof, merkle_root};
    use crate::state::WinnerAssignment;

    fn distributed_round(winners: &[WinnerAssignment]) -> (Round, Vec<[u8; 32]>) {
        let leaves: Vec<[u8; 32]> = winners
            .iter()
            .map(|w| winner_leaf(&w.wallet, w.prize_tier, w.slot_index))
            .collect();
        let round = Round {
            status: RoundStatus::Distributed,
            winners_root: merkle_root(&leaves),
            winners: winners.to_vec(),
            ..Default::default()
        };
        (round, leaves)
    }

    fn assignment(wallet: Pubkey, slot_index: u8) -> WinnerAssignment {
        WinnerAssignment {
            wallet,
            prize_tier: PRIZE_SCHEDULE[usize::from(slot_index)],
            slot_index,
            request_id: Pubkey::default(),
        }
    }

    #[test]
    fn test_winner_claims_once() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let winners = vec![assignment(alice, 0), assignment(bob, 1), assignment(alice, 2)];
        let (round, leaves) = distributed_round(&winners);
        let proof = build_proof(&leaves, 2).unwrap();

        assert!(verify_claim(&round, &alice, 2, 3, &proof).is_ok());

        let mut record = ClaimRecord::default();
        record.mark_claimed(alice, 1).unwrap();
        assert!(verify_claim(&round, &alice, 2, 3, &proof).is_ok());
        assert_eq!(
            record.mark_claimed(alice, 2).unwrap_err(),
            LotteryError::AlreadyClaimed.into()
        );
        assert_eq!(record.claimer, alice);
    }

    #[test]
    fn test_wrong_claimer_or_slot_rejected() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let winners = vec![assignment(alice, 0), assignment(bob, 1)];
        let (round, leaves) = distributed_round(&winners);
        let proof = build_proof(&leaves, 0).unwrap();

        assert_eq!(
            verify_claim(&round, &bob, 0, 1, &proof).unwrap_err(),
            LotteryError::InvalidMerkleProof.into()
        );
        assert_eq!(
            verify_claim(&round, &alice, 0, 2, &proof).unwrap_err(),
            LotteryError::PrizeTierMismatch.into()
        );
        assert_eq!(
            verify_claim(&round, &alice, 10, 3, &proof).unwrap_err(),
            LotteryError::InvalidSlotIndex.into()
        );
    }

    #[test]
    fn test_claim_requires_distributed_round() {
        let alice = Pubkey::new_unique();
        let (mut round, leaves) = distributed_round(&[assignment(alice, 0)]);
        round.status = RoundStatus::VrfRequested;
        let proof = build_proof(&leaves, 0).unwrap();
        assert_eq!(
            verify_claim(&round, &alice, 0, 1, &proof).unwrap_err(),
            LotteryError::InvalidRoundStatus.into()
        );
    }
}
