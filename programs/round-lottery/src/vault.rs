use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::VAULT_SEED;
use crate::error::LotteryError;

/// Moves lamports from a signing wallet into the vault.
pub fn deposit<'info>(
    system_program: &Program<'info, System>,
    from: &Signer<'info>,
    vault: &SystemAccount<'info>,
    amount: u64,
) -> Result<()> {
    system_program::transfer(
        CpiContext::new(
            system_program.to_account_info(),
            system_program::Transfer {
                from: from.to_account_info(),
                to: vault.to_account_info(),
            },
        ),
        amount,
    )
}

/// Pays `amount` out of the vault, keeping it rent exempt.
/// Call only after all bookkeeping for the operation is written.
pub fn pay_out<'info>(
    system_program: &Program<'info, System>,
    vault: &SystemAccount<'info>,
    to: &AccountInfo<'info>,
    vault_bump: u8,
    amount: u64,
) -> Result<()> {
    let reserve = Rent::get()?.minimum_balance(0);
    let available = vault.lamports().saturating_sub(reserve);
    require!(available >= amount, LotteryError::InsufficientVaultBalance);

    let signer_seeds: &[&[&[u8]]] = &[&[VAULT_SEED, &[vault_bump]]];
    system_program::transfer(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            system_program::Transfer {
                from: vault.to_account_info(),
                to: to.clone(),
            },
            signer_seeds,
        ),
        amount,
    )
}
