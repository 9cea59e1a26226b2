use anchor_lang::prelude::*;
use solana_program::keccak::hashv;

use crate::constants::PRIZE_SCHEDULE;
use crate::error::LotteryError;
use crate::state::WinnerAssignment;
use crate::weight::effective_weight;

/// How a wallet stays eligible after winning a slot.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum SelectionMode {
    /// A wallet can win at most one slot.
    PerWallet,
    /// Every ticket is an entry drawn without replacement: a wallet stays in
    /// the draw, weighted by its undrawn tickets, until all of them have won.
    #[default]
    PerTicket,
}

/// A frozen participant as seen by the draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entrant {
    pub wallet: Pubkey,
    pub tickets: u64,
    pub weight: u64,
    pub proof_verified: bool,
}

/// Uniform draw in `[0, range)` for prize slot `slot_index`.
/// Uses the first 16 bytes of keccak256(seed || slot_le) as a little-endian u128.
pub fn draw_point(seed: &[u8; 32], slot_index: u8, range: u64) -> u64 {
    if range == 0 {
        return 0;
    }

    let digest = hashv(&[seed, &u64::from(slot_index).to_le_bytes()]).0;
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    let random_value = u128::from_le_bytes(bytes);

    // strictly below range, so it fits in u64
    (random_value % u128::from(range)) as u64
}

fn remaining_weight(entrant: &Entrant, wins: u64, mode: SelectionMode) -> Result<u64> {
    if wins == 0 {
        return Ok(entrant.weight);
    }
    match mode {
        SelectionMode::PerWallet => Ok(0),
        SelectionMode::PerTicket => {
            let undrawn = entrant.tickets.saturating_sub(wins);
            effective_weight(undrawn, entrant.proof_verified)
        }
    }
}

/// Fills the prize schedule from `seed`.
///
/// Entrants are walked in the order given; callers pass them sorted by wallet.
/// Each slot draws over the weight still eligible, so the first slot draws
/// modulo the round's total weight. Slots left once nobody is eligible stay
/// unassigned.
pub fn select_winners(
    seed: &[u8; 32],
    entrants: &[Entrant],
    mode: SelectionMode,
    request_id: Pubkey,
) -> Result<Vec<WinnerAssignment>> {
    let mut wins = vec![0u64; entrants.len()];
    let mut winners = Vec::with_capacity(PRIZE_SCHEDULE.len());

    for (slot, tier) in PRIZE_SCHEDULE.iter().enumerate() {
        let slot_index = slot as u8;
        let weights = entrants
            .iter()
            .zip(wins.iter())
            .map(|(entrant, won)| remaining_weight(entrant, *won, mode))
            .collect::<Result<Vec<u64>>>()?;
        let pool = weights
            .iter()
            .try_fold(0u64, |acc, w| acc.checked_add(*w))
            .ok_or(LotteryError::MathOverflow)?;
        if pool == 0 {
            msg!("No eligible entrants left at slot {}", slot_index);
            break;
        }

        let point = draw_point(seed, slot_index, pool);
        let mut cumulative = 0u64;
        for (index, weight) in weights.iter().enumerate() {
            cumulative = cumulative
                .checked_add(*weight)
                .ok_or(LotteryError::MathOverflow)?;
            if cumulative > point {
                wins[index] += 1;
                winners.push(WinnerAssignment {
                    wallet: entrants[index].wallet,
                    prize_tier: *tier,
                    slot_index,
                    request_id,
                });
                break;
            }
        }
    }

    Ok(winners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PRIZE_SLOTS, TIER_COMMON, TIER_MID, TIER_TOP};
    use std::collections::HashMap;

    fn entrant(tickets: u64, proof_verified: bool) -> Entrant {
        Entrant {
            wallet: Pubkey::new_unique(),
            tickets,
            weight: effective_weight(tickets, proof_verified).unwrap(),
            proof_verified,
        }
    }

    fn wins_by_wallet(winners: &[WinnerAssignment]) -> HashMap<Pubkey, u64> {
        let mut counts = HashMap::new();
        for w in winners {
            *counts.entry(w.wallet).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_draw_point_in_range() {
        let seed = [0xFF; 32];
        for slot in 0..PRIZE_SLOTS as u8 {
            assert!(draw_point(&seed, slot, 11) < 11);
        }
        assert_eq!(draw_point(&seed, 0, 1), 0);
        assert_eq!(draw_point(&seed, 0, 0), 0);
    }

    #[test]
    fn test_draw_point_varies_by_slot() {
        let seed = [9u8; 32];
        let points: Vec<u64> = (0..PRIZE_SLOTS as u8)
            .map(|slot| draw_point(&seed, slot, u64::MAX))
            .collect();
        assert!(points.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_selection_is_deterministic() {
        let entrants = vec![entrant(10, false), entrant(1, true), entrant(5, true)];
        let request_id = Pubkey::new_unique();
        let seed = [42u8; 32];

        for mode in [SelectionMode::PerWallet, SelectionMode::PerTicket] {
            let first = select_winners(&seed, &entrants, mode, request_id).unwrap();
            let second = select_winners(&seed, &entrants, mode, request_id).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_schedule_tiers_and_slots() {
        let entrants: Vec<Entrant> = (0..12).map(|_| entrant(5, false)).collect();
        let winners =
            select_winners(&[3u8; 32], &entrants, SelectionMode::PerTicket, Pubkey::default())
                .unwrap();

        assert_eq!(winners.len(), PRIZE_SLOTS);
        assert_eq!(winners[0].prize_tier, TIER_TOP);
        assert_eq!(winners[1].prize_tier, TIER_MID);
        for (i, w) in winners.iter().enumerate() {
            assert_eq!(w.slot_index as usize, i);
            if i >= 2 {
                assert_eq!(w.prize_tier, TIER_COMMON);
            }
        }
    }

    #[test]
    fn test_per_wallet_never_repeats_and_leaves_slots_empty() {
        let entrants = vec![entrant(10, false), entrant(1, true), entrant(4, false)];
        for seed_byte in 1..=20u8 {
            let winners = select_winners(
                &[seed_byte; 32],
                &entrants,
                SelectionMode::PerWallet,
                Pubkey::default(),
            )
            .unwrap();
            assert_eq!(winners.len(), 3);
            assert!(wins_by_wallet(&winners).values().all(|count| *count == 1));
        }
    }

    #[test]
    fn test_per_ticket_bounded_by_ticket_count() {
        let alice = entrant(10, false);
        let bob = entrant(1, true);
        let entrants = vec![alice, bob];
        for seed_byte in 1..=20u8 {
            let winners = select_winners(
                &[seed_byte; 32],
                &entrants,
                SelectionMode::PerTicket,
                Pubkey::default(),
            )
            .unwrap();
            // 11 tickets cover all 10 slots
            assert_eq!(winners.len(), PRIZE_SLOTS);
            let counts = wins_by_wallet(&winners);
            assert!(counts.get(&alice.wallet).copied().unwrap_or(0) <= 10);
            assert!(counts.get(&bob.wallet).copied().unwrap_or(0) <= 1);
        }
    }

    #[test]
    fn test_per_ticket_stops_when_tickets_run_out() {
        let entrants = vec![entrant(2, false), entrant(1, false)];
        let winners =
            select_winners(&[77u8; 32], &entrants, SelectionMode::PerTicket, Pubkey::default())
                .unwrap();
        assert_eq!(winners.len(), 3);
        let counts = wins_by_wallet(&winners);
        assert_eq!(counts[&entrants[0].wallet], 2);
        assert_eq!(counts[&entrants[1].wallet], 1);
    }

    #[test]
    fn test_first_slot_follows_cumulative_weight() {
        let entrants = vec![entrant(10, false), entrant(1, true)];
        let seed = [5u8; 32];
        let point = draw_point(&seed, 0, 11);
        let expected = if point < 10 {
            entrants[0].wallet
        } else {
            entrants[1].wallet
        };
        let winners =
            select_winners(&seed, &entrants, SelectionMode::PerWallet, Pubkey::default()).unwrap();
        assert_eq!(winners[0].wallet, expected);
    }

    #[test]
    fn test_no_entrants_no_winners() {
        let winners =
            select_winners(&[1u8; 32], &[], SelectionMode::PerTicket, Pubkey::default()).unwrap();
        assert!(winners.is_empty());
    }
}
