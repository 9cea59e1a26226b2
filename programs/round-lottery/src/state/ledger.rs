use anchor_lang::prelude::*;

use crate::error::LotteryError;

/// Claim status of one prize slot. Created on the first claim attempt.
#[account]
#[derive(InitSpace, Default)]
pub struct ClaimRecord {
    pub bump: u8,
    pub round_id: u64,
    pub slot_index: u8,
    pub claimed: bool,
    pub claimer: Pubkey,
    pub claimed_at: i64,
}

impl ClaimRecord {
    /// Irreversible; must run before any prize transfer.
    pub fn mark_claimed(&mut self, claimer: Pubkey, now: i64) -> Result<()> {
        require!(!self.claimed, LotteryError::AlreadyClaimed);
        self.claimed = true;
        self.claimer = claimer;
        self.claimed_at = now;
        Ok(())
    }
}

/// Cross-round refund balance of a wallet (pull payment).
#[account]
#[derive(InitSpace, Default)]
pub struct RefundBalance {
    pub bump: u8,
    pub wallet: Pubkey,
    pub amount: u64,
}

impl RefundBalance {
    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(LotteryError::MathOverflow)?;
        Ok(())
    }

    /// Zeroes the balance and returns what it held.
    pub fn take(&mut self) -> Result<u64> {
        require!(self.amount > 0, LotteryError::NothingToWithdraw);
        Ok(std::mem::take(&mut self.amount))
    }
}
