use anchor_lang::prelude::*;

use crate::selection::SelectionMode;

#[event]
pub struct ConfigUpdated {
    pub authority: Pubkey,
    pub randomness_provider: Pubkey,
    pub fee_recipient: Pubkey,
    pub ticket_price: u64,
    pub max_wager_per_wallet: u64,
    pub prize_amounts: [u64; 3],
    pub selection_mode: SelectionMode,
}

#[event]
pub struct DenylistUpdated {
    pub wallet: Pubkey,
    pub denied: bool,
}

#[event]
pub struct PauseToggled {
    pub paused: bool,
    pub timestamp: i64,
}

#[event]
pub struct RoundCreated {
    pub round_id: u64,
    pub opens_at: i64,
    pub closes_at: i64,
    pub carried_over: u64,
}

#[event]
pub struct RoundOpened {
    pub round_id: u64,
}

/// Change record for a ticket purchase.
#[event]
pub struct TicketsPlaced {
    pub round_id: u64,
    pub wallet: Pubkey,
    pub tickets_added: u64,
    pub paid: u64,
    pub tickets: u64,
    pub weight: u64,
    pub total_tickets: u64,
    pub total_weight: u64,
}

/// Change record for an accepted puzzle proof.
#[event]
pub struct ProofSubmitted {
    pub round_id: u64,
    pub wallet: Pubkey,
    pub proof_hash: [u8; 32],
    pub old_weight: u64,
    pub new_weight: u64,
    pub total_weight: u64,
}

#[event]
pub struct RoundClosed {
    pub round_id: u64,
    pub total_tickets: u64,
    pub total_weight: u64,
    pub participant_count: u32,
}

#[event]
pub struct RoundRefunded {
    pub round_id: u64,
    pub total_tickets: u64,
    pub total_refunded: u64,
    pub participant_count: u32,
}

#[event]
pub struct SnapshotCommitted {
    pub round_id: u64,
    pub participants_root: [u8; 32],
    pub total_tickets: u64,
    pub total_weight: u64,
    pub participant_count: u32,
    pub selection_mode: SelectionMode,
}

#[event]
pub struct RandomnessRequested {
    pub round_id: u64,
    pub request_id: Pubkey,
    pub requested_at: i64,
}

#[event]
pub struct RandomnessRerequested {
    pub round_id: u64,
    pub stale_request_id: Pubkey,
    pub request_id: Pubkey,
    pub requested_at: i64,
}

#[event]
pub struct WinnersCommitted {
    pub round_id: u64,
    pub request_id: Pubkey,
    pub seed: [u8; 32],
    pub winners_root: [u8; 32],
    pub winner_count: u8,
}

#[event]
pub struct FeesDistributed {
    pub round_id: u64,
    pub fee_recipient: Pubkey,
    pub fee_amount: u64,
    pub rollover_amount: u64,
}

#[event]
pub struct ManifestPublished {
    pub round_id: u64,
    pub participants_cid: String,
    pub winners_cid: String,
}

#[event]
pub struct PrizeClaimed {
    pub round_id: u64,
    pub slot_index: u8,
    pub prize_tier: u8,
    pub claimer: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct RefundWithdrawn {
    pub wallet: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
