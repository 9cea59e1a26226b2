use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::constants::{CONFIG_SEED, DENYLIST_SEED, VAULT_SEED};
use crate::error::LotteryError;
use crate::events::{ConfigUpdated, DenylistUpdated, PauseToggled};
use crate::selection::SelectionMode;
use crate::state::{Config, DenylistEntry};
use crate::vault;

/// Operator-tunable settings, used by both initialize and update.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct ConfigParams {
    pub randomness_provider: Pubkey,
    pub fee_recipient: Pubkey,
    pub ticket_price: u64,
    pub max_wager_per_wallet: u64,
    pub prize_amounts: [u64; 3],
    pub selection_mode: SelectionMode,
}

impl ConfigParams {
    fn validate(&self) -> Result<()> {
        require!(self.ticket_price > 0, LotteryError::InvalidConfig);
        require!(
            self.max_wager_per_wallet >= self.ticket_price,
            LotteryError::InvalidConfig
        );
        require!(
            self.randomness_provider != Pubkey::default(),
            LotteryError::InvalidConfig
        );
        require!(
            self.fee_recipient != Pubkey::default(),
            LotteryError::InvalidConfig
        );
        Ok(())
    }

    fn apply(&self, config: &mut Config) {
        config.randomness_provider = self.randomness_provider;
        config.fee_recipient = self.fee_recipient;
        config.ticket_price = self.ticket_price;
        config.max_wager_per_wallet = self.max_wager_per_wallet;
        config.prize_amounts = self.prize_amounts;
        config.selection_mode = self.selection_mode;
    }
}

fn emit_config(config: &Config) {
    emit!(ConfigUpdated {
        authority: config.authority,
        randomness_provider: config.randomness_provider,
        fee_recipient: config.fee_recipient,
        ticket_price: config.ticket_price,
        max_wager_per_wallet: config.max_wager_per_wallet,
        prize_amounts: config.prize_amounts,
        selection_mode: config.selection_mode,
    });
}

/// Accounts required to initialize the lottery configuration and its vault.
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// The account paying for account creation; becomes the authority.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + Config::INIT_SPACE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Box<Account<'info, Config>>,

    /// SOL vault holding wagers; funded here up to its rent-exempt minimum.
    #[account(mut, seeds = [VAULT_SEED], bump)]
    pub vault: SystemAccount<'info>,

    /// Token paid out to prize winners.
    pub prize_mint: InterfaceAccount<'info, Mint>,

    pub system_program: Program<'info, System>,
}

pub fn process_initialize_config(ctx: Context<InitializeConfig>, params: ConfigParams) -> Result<()> {
    params.validate()?;

    let config = &mut ctx.accounts.config;
    config.bump = ctx.bumps.config;
    config.vault_bump = ctx.bumps.vault;
    config.authority = ctx.accounts.payer.key();
    config.prize_mint = ctx.accounts.prize_mint.key();
    config.paused = false;
    config.last_request_at = 0;
    config.round_counter = 0;
    config.latest_round_settled = true;
    config.rollover_balance = 0;
    params.apply(config);

    let reserve = Rent::get()?.minimum_balance(0);
    let shortfall = reserve.saturating_sub(ctx.accounts.vault.lamports());
    if shortfall > 0 {
        vault::deposit(
            &ctx.accounts.system_program,
            &ctx.accounts.payer,
            &ctx.accounts.vault,
            shortfall,
        )?;
    }

    msg!("Config initialized, authority {}", config.authority);
    emit_config(config);
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ LotteryError::Unauthorized,
    )]
    pub config: Account<'info, Config>,
}

pub fn process_update_config(ctx: Context<UpdateConfig>, params: ConfigParams) -> Result<()> {
    params.validate()?;
    let config = &mut ctx.accounts.config;
    params.apply(config);

    msg!("Config updated");
    emit_config(config);
    Ok(())
}

#[derive(Accounts)]
#[instruction(wallet: Pubkey)]
pub struct SetDenylist<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ LotteryError::Unauthorized,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + DenylistEntry::INIT_SPACE,
        seeds = [DENYLIST_SEED, wallet.as_ref()],
        bump
    )]
    pub denylist_entry: Account<'info, DenylistEntry>,

    pub system_program: Program<'info, System>,
}

pub fn process_set_denylist(ctx: Context<SetDenylist>, wallet: Pubkey, denied: bool) -> Result<()> {
    let entry = &mut ctx.accounts.denylist_entry;
    entry.bump = ctx.bumps.denylist_entry;
    entry.wallet = wallet;
    entry.denied = denied;

    msg!("Deny-list {} -> {}", wallet, denied);
    emit!(DenylistUpdated { wallet, denied });
    Ok(())
}

#[derive(Accounts)]
pub struct SetPaused<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ LotteryError::Unauthorized,
    )]
    pub config: Account<'info, Config>,
}

pub fn process_set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    ctx.accounts.config.paused = paused;

    msg!("Paused: {}", paused);
    emit!(PauseToggled {
        paused,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
