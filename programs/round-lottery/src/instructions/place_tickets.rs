use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, DENYLIST_SEED, PARTICIPANT_SEED, REFUND_SEED, ROUND_SEED, VAULT_SEED};
use crate::error::LotteryError;
use crate::events::TicketsPlaced;
use crate::state::{ensure_not_denied, Config, Participant, RefundBalance, Round, RoundStatus};
use crate::vault;
use crate::weight::validate_purchase;

/// Accounts required to buy a ticket bundle.
/// Handles:
/// - Payment transfer into the vault
/// - Participant record creation or update
/// - Refund ledger creation for the wallet
#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct PlaceTickets<'info> {
    /// The wallet buying tickets.
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

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Participant::INIT_SPACE,
        seeds = [PARTICIPANT_SEED, round_id.to_le_bytes().as_ref(), payer.key().as_ref()],
        bump
    )]
    pub participant: Box<Account<'info, Participant>>,

    /// Created on first purchase so a refund can always be credited later.
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + RefundBalance::INIT_SPACE,
        seeds = [REFUND_SEED, payer.key().as_ref()],
        bump
    )]
    pub refund_balance: Box<Account<'info, RefundBalance>>,

    /// CHECK: address pinned by seeds; contents read by `ensure_not_denied`.
    #[account(seeds = [DENYLIST_SEED, payer.key().as_ref()], bump)]
    pub denylist_entry: UncheckedAccount<'info>,

    #[account(mut, seeds = [VAULT_SEED], bump = config.vault_bump)]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Buys `ticket_count` tickets for the caller.
///
/// Steps performed:
/// 1. Check pause, deny-list, round status and the sale window.
/// 2. Validate the bundle, the payment and the per-wallet cap.
/// 3. Recompute the participant weight and fold the delta into the round.
/// 4. Transfer the payment into the vault.
pub fn process_place_tickets(
    ctx: Context<PlaceTickets>,
    round_id: u64,
    ticket_count: u64,
    payment: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let config = &ctx.accounts.config;
    let payer = ctx.accounts.payer.key();

    config.ensure_not_paused()?;
    ensure_not_denied(&ctx.accounts.denylist_entry)?;

    let round = &mut ctx.accounts.round;
    round.require_status(RoundStatus::Open)?;
    if now < round.opens_at || now > round.closes_at {
        msg!("Now: {}, window: [{}, {}]", now, round.opens_at, round.closes_at);
        return err!(LotteryError::OutsideSaleWindow);
    }

    let participant = &mut ctx.accounts.participant;
    validate_purchase(
        ticket_count,
        payment,
        config.ticket_price,
        participant.wagered,
        config.max_wager_per_wallet,
    )?;

    if participant.tickets == 0 {
        participant.bump = ctx.bumps.participant;
        participant.round_id = round_id;
        participant.wallet = payer;
    }
    let change = participant.add_tickets(ticket_count, payment)?;
    round.apply_weight_change(&change, ticket_count, payment)?;

    let refund_balance = &mut ctx.accounts.refund_balance;
    if refund_balance.wallet == Pubkey::default() {
        refund_balance.bump = ctx.bumps.refund_balance;
        refund_balance.wallet = payer;
    }

    vault::deposit(
        &ctx.accounts.system_program,
        &ctx.accounts.payer,
        &ctx.accounts.vault,
        payment,
    )?;

    msg!(
        "{} bought {} tickets in round {}: weight {} -> {}",
        payer,
        ticket_count,
        round_id,
        change.old_weight,
        change.new_weight
    );
    emit!(TicketsPlaced {
        round_id,
        wallet: payer,
        tickets_added: ticket_count,
        paid: payment,
        tickets: participant.tickets,
        weight: participant.weight,
        total_tickets: round.total_tickets,
        total_weight: round.total_weight,
    });
    Ok(())
}
