use anchor_lang::prelude::*;

use crate::error::LotteryError;
use crate::merkle::{merkle_root, participant_leaf};
use crate::selection::Entrant;
use crate::state::{Participant, RefundBalance, Round};

/// Checks that `participants` is exactly the round's participant set:
/// right round, strictly ascending wallets, and totals that add up.
fn verify_complete_set(round: &Round, participants: &[Account<Participant>]) -> Result<()> {
    require!(
        participants.len() == round.participant_count as usize,
        LotteryError::ParticipantSetMismatch
    );

    let mut tickets = 0u64;
    let mut weight = 0u64;
    let mut previous: Option<Pubkey> = None;
    for participant in participants {
        require!(
            participant.round_id == round.id && participant.tickets > 0,
            LotteryError::ParticipantSetMismatch
        );
        if let Some(previous) = previous {
            require!(
                previous < participant.wallet,
                LotteryError::ParticipantSetMismatch
            );
        }
        previous = Some(participant.wallet);

        tickets = tickets
            .checked_add(participant.tickets)
            .ok_or(LotteryError::MathOverflow)?;
        weight = weight
            .checked_add(participant.weight)
            .ok_or(LotteryError::MathOverflow)?;
    }

    require!(
        tickets == round.total_tickets && weight == round.total_weight,
        LotteryError::ParticipantSetMismatch
    );
    Ok(())
}

/// Loads the full participant set of `round` from remaining accounts.
pub fn load_participants<'info>(
    round: &Round,
    infos: &'info [AccountInfo<'info>],
) -> Result<Vec<Account<'info, Participant>>> {
    let participants = infos
        .iter()
        .map(Account::<Participant>::try_from)
        .collect::<Result<Vec<_>>>()?;
    verify_complete_set(round, &participants)?;
    Ok(participants)
}

pub fn participants_root(participants: &[Account<Participant>]) -> [u8; 32] {
    let leaves: Vec<[u8; 32]> = participants
        .iter()
        .map(|p| participant_leaf(&p.wallet, p.weight))
        .collect();
    merkle_root(&leaves)
}

pub fn entrants(participants: &[Account<Participant>]) -> Vec<Entrant> {
    participants
        .iter()
        .map(|p| Entrant {
            wallet: p.wallet,
            tickets: p.tickets,
            weight: p.weight,
            proof_verified: p.proof_verified,
        })
        .collect()
}

/// Credits every participant's wager to its refund balance.
///
/// `infos` holds `(participant, refund_balance)` pairs covering the whole
/// participant set. Returns the total credited.
pub fn credit_refunds<'info>(round: &Round, infos: &'info [AccountInfo<'info>]) -> Result<u64> {
    require!(infos.len() % 2 == 0, LotteryError::ParticipantSetMismatch);

    let mut participants = Vec::with_capacity(infos.len() / 2);
    let mut balances = Vec::with_capacity(infos.len() / 2);
    for pair in infos.chunks(2) {
        participants.push(Account::<Participant>::try_from(&pair[0])?);
        require!(pair[1].is_writable, LotteryError::ParticipantSetMismatch);
        balances.push(Account::<RefundBalance>::try_from(&pair[1])?);
    }
    verify_complete_set(round, &participants)?;

    let mut total = 0u64;
    for (participant, balance) in participants.iter().zip(balances.iter_mut()) {
        require_keys_eq!(
            participant.wallet,
            balance.wallet,
            LotteryError::ParticipantSetMismatch
        );
        balance.credit(participant.wagered)?;
        balance.exit(&crate::ID)?;
        total = total
            .checked_add(participant.wagered)
            .ok_or(LotteryError::MathOverflow)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::{build_proof, verify_proof};

    const LAMPORTS: u64 = 1_000_000;

    fn account_info<T: AccountSerialize>(record: &T, writable: bool) -> AccountInfo<'static> {
        let mut data = Vec::new();
        record.try_serialize(&mut data).unwrap();
        AccountInfo::new(
            Box::leak(Box::new(Pubkey::new_unique())),
            false,
            writable,
            Box::leak(Box::new(LAMPORTS)),
            Box::leak(data.into_boxed_slice()),
            &crate::ID,
            false,
            0,
        )
    }

    fn leak(infos: Vec<AccountInfo<'static>>) -> &'static [AccountInfo<'static>] {
        Box::leak(infos.into_boxed_slice())
    }

    fn participant(round_id: u64, wallet: Pubkey, tickets: u64, wagered: u64) -> Participant {
        Participant {
            round_id,
            wallet,
            wagered,
            tickets,
            weight: tickets,
            ..Default::default()
        }
    }

    fn sorted_wallets(n: usize) -> Vec<Pubkey> {
        let mut wallets: Vec<Pubkey> = (0..n).map(|_| Pubkey::new_unique()).collect();
        wallets.sort();
        wallets
    }

    fn round_for(id: u64, participants: &[Participant]) -> Round {
        Round {
            id,
            total_tickets: participants.iter().map(|p| p.tickets).sum(),
            total_weight: participants.iter().map(|p| p.weight).sum(),
            participant_count: participants.len() as u32,
            ..Default::default()
        }
    }

    fn infos_for(participants: &[Participant]) -> &'static [AccountInfo<'static>] {
        leak(participants.iter().map(|p| account_info(p, false)).collect())
    }

    fn refund_pairs(participants: &[Participant]) -> Vec<AccountInfo<'static>> {
        participants
            .iter()
            .flat_map(|p| {
                let balance = RefundBalance {
                    wallet: p.wallet,
                    amount: 7,
                    ..Default::default()
                };
                [account_info(p, false), account_info(&balance, true)]
            })
            .collect()
    }

    fn balance_of(info: &AccountInfo) -> RefundBalance {
        let data = info.try_borrow_data().unwrap();
        RefundBalance::try_deserialize(&mut &data[..]).unwrap()
    }

    fn three_participants(round_id: u64) -> Vec<Participant> {
        let wallets = sorted_wallets(3);
        vec![
            participant(round_id, wallets[0], 1, 10),
            participant(round_id, wallets[1], 5, 50),
            participant(round_id, wallets[2], 2, 20),
        ]
    }

    #[test]
    fn test_complete_set_loads_in_order() {
        let participants = three_participants(4);
        let round = round_for(4, &participants);

        let loaded = load_participants(&round, infos_for(&participants)).unwrap();
        let wallets: Vec<Pubkey> = loaded.iter().map(|p| p.wallet).collect();
        let expected: Vec<Pubkey> = participants.iter().map(|p| p.wallet).collect();
        assert_eq!(wallets, expected);
        assert_eq!(entrants(&loaded).len(), 3);
    }

    #[test]
    fn test_loaded_set_root_proves_every_participant() {
        let participants = three_participants(1);
        let round = round_for(1, &participants);
        let loaded = load_participants(&round, infos_for(&participants)).unwrap();

        let root = participants_root(&loaded);
        let leaves: Vec<[u8; 32]> = participants
            .iter()
            .map(|p| participant_leaf(&p.wallet, p.weight))
            .collect();
        for (index, leaf) in leaves.iter().enumerate() {
            let proof = build_proof(&leaves, index).unwrap();
            assert!(verify_proof(*leaf, &proof, &root));
        }

        let inflated = participant_leaf(&participants[0].wallet, participants[0].weight + 1);
        let proof = build_proof(&leaves, 0).unwrap();
        assert!(!verify_proof(inflated, &proof, &root));
    }

    #[test]
    fn test_incomplete_or_foreign_sets_rejected() {
        let participants = three_participants(2);
        let round = round_for(2, &participants);
        let mismatch = |participants: &[Participant]| {
            load_participants(&round, infos_for(participants)).unwrap_err()
        };

        // missing participant
        assert_eq!(
            mismatch(&participants[..2]),
            LotteryError::ParticipantSetMismatch.into()
        );

        // unsorted
        let mut unsorted = participants.clone();
        unsorted.swap(0, 2);
        assert_eq!(mismatch(&unsorted), LotteryError::ParticipantSetMismatch.into());

        // duplicate wallet in place of another
        let mut duplicated = participants.clone();
        duplicated[1] = duplicated[0].clone();
        assert_eq!(mismatch(&duplicated), LotteryError::ParticipantSetMismatch.into());

        // record from another round
        let mut foreign = participants.clone();
        foreign[1].round_id = 3;
        assert_eq!(mismatch(&foreign), LotteryError::ParticipantSetMismatch.into());

        // totals disagree with the round
        let mut inflated = participants.clone();
        inflated[2].weight += 1;
        assert_eq!(mismatch(&inflated), LotteryError::ParticipantSetMismatch.into());
    }

    #[test]
    fn test_refunds_credit_each_wager() {
        let participants = three_participants(5);
        let round = round_for(5, &participants);
        let infos = leak(refund_pairs(&participants));

        let total = credit_refunds(&round, infos).unwrap();
        assert_eq!(total, 80);
        for (pair, participant) in infos.chunks(2).zip(participants.iter()) {
            let balance = balance_of(&pair[1]);
            assert_eq!(balance.wallet, participant.wallet);
            assert_eq!(balance.amount, 7 + participant.wagered);
        }
    }

    #[test]
    fn test_malformed_refund_pairs_rejected() {
        let participants = three_participants(6);
        let round = round_for(6, &participants);

        let mut odd = refund_pairs(&participants);
        odd.pop();
        assert_eq!(
            credit_refunds(&round, leak(odd)).unwrap_err(),
            LotteryError::ParticipantSetMismatch.into()
        );

        let mut read_only = refund_pairs(&participants);
        read_only[3].is_writable = false;
        assert_eq!(
            credit_refunds(&round, leak(read_only)).unwrap_err(),
            LotteryError::ParticipantSetMismatch.into()
        );

        let mut swapped = refund_pairs(&participants);
        swapped.swap(1, 3);
        assert_eq!(
            credit_refunds(&round, leak(swapped)).unwrap_err(),
            LotteryError::ParticipantSetMismatch.into()
        );

        let short = refund_pairs(&participants[..2]);
        assert_eq!(
            credit_refunds(&round, leak(short)).unwrap_err(),
            LotteryError::ParticipantSetMismatch.into()
        );
    }
}
