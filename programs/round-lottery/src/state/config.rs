use anchor_lang::prelude::*;

use crate::constants::TIER_COMMON;
use crate::error::LotteryError;
use crate::selection::SelectionMode;

#[account]
#[derive(InitSpace, Default)]
pub struct Config {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Bump of the SOL vault PDA holding wagers.
    pub vault_bump: u8,

    /// Operator allowed to drive round lifecycles and change settings.
    pub authority: Pubkey,

    /// The only identity allowed to deliver randomness fulfillments.
    pub randomness_provider: Pubkey,

    /// Receives the fee share of every distributed pot.
    pub fee_recipient: Pubkey,

    /// Mint of the token paid out to prize winners.
    pub prize_mint: Pubkey,

    /// Prize amount per tier, indexed by `tier - 1`.
    pub prize_amounts: [u64; 3],

    /// Price (in lamports) of a single ticket.
    pub ticket_price: u64,

    /// Maximum cumulative wager of one wallet in one round.
    pub max_wager_per_wallet: u64,

    /// Exclusivity semantics applied to rounds snapshotted from now on.
    pub selection_mode: SelectionMode,

    pub paused: bool,

    /// Timestamp of the last randomness request, across all rounds.
    pub last_request_at: i64,

    /// Number of rounds created so far; the next round gets this id.
    pub round_counter: u64,

    /// False while the latest round has not reached Distributed or Refunded.
    pub latest_round_settled: bool,

    /// Pot share carried into the next round.
    pub rollover_balance: u64,
}

impl Config {
    pub fn prize_amount(&self, tier: u8) -> Result<u64> {
        require!(
            (1..=TIER_COMMON).contains(&tier),
            LotteryError::PrizeTierMismatch
        );
        Ok(self.prize_amounts[usize::from(tier - 1)])
    }

    pub fn ensure_not_paused(&self) -> Result<()> {
        require!(!self.paused, LotteryError::ProgramPaused);
        Ok(())
    }

    /// Hands the rollover balance to a newly created round.
    pub fn take_rollover(&mut self) -> u64 {
        std::mem::take(&mut self.rollover_balance)
    }
}
