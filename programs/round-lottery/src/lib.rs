use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod merkle;
pub mod randomness;
pub mod selection;
pub mod state;
pub mod vault;
pub mod weight;

declare_id!("2RTh2Y4e2N421EbSnUYTKdGqDHJH7etxZb3VrWDMpNMY");

#[program]
pub mod round_lottery {
    use super::*;

    pub fn initialize_config(ctx: Context<InitializeConfig>, params: ConfigParams) -> Result<()> {
        process_initialize_config(ctx, params)
    }

    pub fn update_config(ctx: Context<UpdateConfig>, params: ConfigParams) -> Result<()> {
        process_update_config(ctx, params)
    }

    pub fn set_denylist(ctx: Context<SetDenylist>, wallet: Pubkey, denied: bool) -> Result<()> {
        process_set_denylist(ctx, wallet, denied)
    }

    pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
        process_set_paused(ctx, paused)
    }

    pub fn create_round(ctx: Context<CreateRound>, opens_at: i64, closes_at: i64) -> Result<()> {
        process_create_round(ctx, opens_at, closes_at)
    }

    pub fn open_round(ctx: Context<RoundTransition>, round_id: u64) -> Result<()> {
        process_open_round(ctx, round_id)
    }

    /// Remaining accounts: `(participant, refund_balance)` pairs when the
    /// round closes below the ticket threshold.
    pub fn close_round<'info>(
        ctx: Context<'_, '_, 'info, 'info, RoundTransition<'info>>,
        round_id: u64,
    ) -> Result<()> {
        process_close_round(ctx, round_id)
    }

    /// Remaining accounts: all participants, sorted by wallet.
    pub fn snapshot_round<'info>(
        ctx: Context<'_, '_, 'info, 'info, RoundTransition<'info>>,
        round_id: u64,
    ) -> Result<()> {
        process_snapshot_round(ctx, round_id)
    }

    pub fn publish_manifest(
        ctx: Context<RoundTransition>,
        round_id: u64,
        participants_cid: String,
        winners_cid: String,
    ) -> Result<()> {
        process_publish_manifest(ctx, round_id, participants_cid, winners_cid)
    }

    pub fn place_tickets(
        ctx: Context<PlaceTickets>,
        round_id: u64,
        ticket_count: u64,
        payment: u64,
    ) -> Result<()> {
        process_place_tickets(ctx, round_id, ticket_count, payment)
    }

    pub fn submit_proof(ctx: Context<SubmitProof>, round_id: u64, proof_hash: [u8; 32]) -> Result<()> {
        process_submit_proof(ctx, round_id, proof_hash)
    }

    pub fn request_randomness(ctx: Context<RequestRandomness>, round_id: u64) -> Result<()> {
        process_request_randomness(ctx, round_id)
    }

    pub fn rerequest_randomness(ctx: Context<RequestRandomness>, round_id: u64) -> Result<()> {
        process_rerequest_randomness(ctx, round_id)
    }

    /// Called by the randomness provider. Remaining accounts: all
    /// participants, sorted by wallet.
    pub fn fulfill_randomness<'info>(
        ctx: Context<'_, '_, 'info, 'info, FulfillRandomness<'info>>,
        round_id: u64,
        request_id: Pubkey,
        randomness: [u8; 32],
    ) -> Result<()> {
        process_fulfill_randomness(ctx, round_id, request_id, randomness)
    }

    pub fn claim_prize(
        ctx: Context<ClaimPrize>,
        round_id: u64,
        slot_index: u8,
        prize_tier: u8,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        process_claim_prize(ctx, round_id, slot_index, prize_tier, proof)
    }

    pub fn withdraw_refund(ctx: Context<WithdrawRefund>) -> Result<()> {
        process_withdraw_refund(ctx)
    }
}
