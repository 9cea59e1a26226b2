use anchor_lang::prelude::*;

use crate::error::LotteryError;

/// Deny-list flag for one wallet. Absence of the account means allowed.
#[account]
#[derive(InitSpace)]
pub struct DenylistEntry {
    pub bump: u8,
    pub wallet: Pubkey,
    pub denied: bool,
}

/// Rejects the call if `entry` holds a deny-list record with `denied` set.
///
/// The account address is pinned by the caller's seeds constraint, so an
/// uninitialized account here simply means the wallet was never listed.
pub fn ensure_not_denied(entry: &AccountInfo) -> Result<()> {
    if entry.owner != &crate::ID || entry.data_is_empty() {
        return Ok(());
    }
    let data = entry.try_borrow_data()?;
    let record = DenylistEntry::try_deserialize(&mut &data[..])?;
    require!(!record.denied, LotteryError::WalletDenied);
    Ok(())
}
