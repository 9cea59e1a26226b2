use anchor_lang::prelude::*;
use solana_program::keccak::hashv;

use crate::error::LotteryError;
use crate::weight::effective_weight;

/// Weight before and after a participant mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightChange {
    pub old_weight: u64,
    pub new_weight: u64,
    /// True when the mutation gave the wallet its first ticket in the round.
    pub first_entry: bool,
}

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Participant {
    pub bump: u8,
    pub round_id: u64,
    pub wallet: Pubkey,
    /// Lamports wagered by this wallet in the round.
    pub wagered: u64,
    pub tickets: u64,
    /// floor(tickets * multiplier); recomputed from `tickets` on every change.
    pub weight: u64,
    pub proof_verified: bool,
}

impl Participant {
    pub fn add_tickets(&mut self, ticket_count: u64, wager: u64) -> Result<WeightChange> {
        let old_weight = self.weight;
        let first_entry = self.tickets == 0;

        self.tickets = self
            .tickets
            .checked_add(ticket_count)
            .ok_or(LotteryError::MathOverflow)?;
        self.wagered = self
            .wagered
            .checked_add(wager)
            .ok_or(LotteryError::MathOverflow)?;
        self.weight = effective_weight(self.tickets, self.proof_verified)?;

        Ok(WeightChange {
            old_weight,
            new_weight: self.weight,
            first_entry,
        })
    }

    pub fn mark_proof_verified(&mut self) -> Result<WeightChange> {
        require!(self.tickets > 0, LotteryError::NoTicketsHeld);
        require!(!self.proof_verified, LotteryError::ProofAlreadySubmitted);

        let old_weight = self.weight;
        self.proof_verified = true;
        self.weight = effective_weight(self.tickets, true)?;

        Ok(WeightChange {
            old_weight,
            new_weight: self.weight,
            first_entry: false,
        })
    }
}

#[account]
#[derive(InitSpace, Default)]
pub struct PuzzleProof {
    pub bump: u8,
    pub round_id: u64,
    pub wallet: Pubkey,
    pub proof_hash: [u8; 32],
    /// Once set, the proof can be neither resubmitted nor revoked.
    pub verified: bool,
    pub submitted_at: i64,
}

impl PuzzleProof {
    /// Rejects the zero hash and hashes anyone could derive without solving
    /// the puzzle: keccak of nothing, the wallet bytes, or their keccak.
    pub fn screen(proof_hash: &[u8; 32], wallet: &Pubkey) -> Result<()> {
        let empty = hashv(&[]).0;
        let of_wallet = hashv(&[wallet.as_ref()]).0;
        let trivial = *proof_hash == [0u8; 32]
            || *proof_hash == empty
            || proof_hash == wallet.as_ref()
            || *proof_hash == of_wallet;
        require!(!trivial, LotteryError::TrivialProofHash);
        Ok(())
    }

    pub fn accept(&mut self, proof_hash: [u8; 32], now: i64) -> Result<()> {
        require!(!self.verified, LotteryError::ProofAlreadySubmitted);
        self.proof_hash = proof_hash;
        self.verified = true;
        self.submitted_at = now;
        Ok(())
    }
}
