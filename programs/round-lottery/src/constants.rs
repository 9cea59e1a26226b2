use anchor_lang::prelude::*;

#[constant]
pub const CONFIG_SEED: &[u8] = b"config";

#[constant]
pub const VAULT_SEED: &[u8] = b"vault";

#[constant]
pub const ROUND_SEED: &[u8] = b"round";

#[constant]
pub const PARTICIPANT_SEED: &[u8] = b"participant";

#[constant]
pub const PUZZLE_PROOF_SEED: &[u8] = b"puzzle_proof";

#[constant]
pub const CLAIM_SEED: &[u8] = b"claim";

#[constant]
pub const REFUND_SEED: &[u8] = b"refund";

#[constant]
pub const DENYLIST_SEED: &[u8] = b"denylist";

/// Ticket bundles a wallet may buy in one instruction.
pub const TICKET_BUNDLES: [u64; 3] = [1, 5, 10];

/// Distinct wallets a round accepts. Snapshot and fulfillment load every
/// participant as a remaining account of a single legacy transaction, so the
/// set has to fit next to the fixed accounts of `fulfill_randomness`.
pub const MAX_PARTICIPANTS: u32 = 20;

/// Rounds closing with fewer tickets than this are refunded.
pub const MIN_TICKETS_TO_DRAW: u64 = 10;

/// Minimum gap between two randomness requests, across all rounds.
pub const RANDOMNESS_COOLDOWN_SECS: i64 = 60;

/// A fulfillment older than this (relative to the request) is stale.
pub const FULFILLMENT_TIMEOUT_SECS: i64 = 3_600;

/// Fixed-point scale for weight multipliers.
pub const WEIGHT_SCALE: u64 = 1_000;

/// 1.0x
pub const BASE_MULTIPLIER: u64 = 1_000;

/// 1.4x once a puzzle proof has been accepted.
pub const PROOF_MULTIPLIER: u64 = 1_400;

pub const PRIZE_SLOTS: usize = 10;

pub const TIER_TOP: u8 = 1;
pub const TIER_MID: u8 = 2;
pub const TIER_COMMON: u8 = 3;

/// Tier of every prize slot, indexed by slot.
pub const PRIZE_SCHEDULE: [u8; PRIZE_SLOTS] = [
    TIER_TOP,
    TIER_MID,
    TIER_COMMON,
    TIER_COMMON,
    TIER_COMMON,
    TIER_COMMON,
    TIER_COMMON,
    TIER_COMMON,
    TIER_COMMON,
    TIER_COMMON,
];

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Share of the pot paid to the fee recipient; the rest rolls over.
pub const FEE_RECIPIENT_BPS: u64 = 8_000;

/// Upper bound on stored content ids for the published round files.
pub const MAX_CID_LEN: usize = 64;
