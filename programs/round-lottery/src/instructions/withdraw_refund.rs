use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, REFUND_SEED, VAULT_SEED};
use crate::events::RefundWithdrawn;
use crate::state::{Config, RefundBalance};
use crate::vault;

#[derive(Accounts)]
pub struct WithdrawRefund<'info> {
    #[account(mut)]
    pub wallet: Signer<'info>,

    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [REFUND_SEED, wallet.key().as_ref()],
        bump = refund_balance.bump,
        has_one = wallet,
    )]
    pub refund_balance: Box<Account<'info, RefundBalance>>,

    #[account(mut, seeds = [VAULT_SEED], bump = config.vault_bump)]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Pays out the caller's whole refund balance. The balance is zeroed before
/// the transfer; a failed transfer aborts the instruction and restores it.
pub fn process_withdraw_refund(ctx: Context<WithdrawRefund>) -> Result<()> {
    let wallet = ctx.accounts.wallet.key();
    let amount = ctx.accounts.refund_balance.take()?;

    msg!("Refund of {} lamports to {}", amount, wallet);
    emit!(RefundWithdrawn {
        wallet,
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    vault::pay_out(
        &ctx.accounts.system_program,
        &ctx.accounts.vault,
        &ctx.accounts.wallet.to_account_info(),
        ctx.accounts.config.vault_bump,
        amount,
    )
}
