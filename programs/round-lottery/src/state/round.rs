use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, FEE_RECIPIENT_BPS, MAX_PARTICIPANTS, MIN_TICKETS_TO_DRAW};
use crate::error::LotteryError;
use crate::selection::SelectionMode;
use crate::state::WeightChange;

/// Lifecycle of a round. Only the transitions listed in [`RoundStatus::next`]
/// exist; there is no way back.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum RoundStatus {
    #[default]
    Created,
    Open,
    Closed,
    Snapshot,
    VrfRequested,
    Distributed,
    Refunded,
}

/// Lifecycle triggers fed into [`RoundStatus::next`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundEvent {
    Open,
    Close,
    Snapshot,
    RequestRandomness,
    Fulfill,
}

impl RoundStatus {
    /// The single place where legal transitions are decided.
    ///
    /// Closing a round that sold fewer than [`MIN_TICKETS_TO_DRAW`] tickets
    /// lands in `Refunded` instead of `Closed`.
    pub fn next(self, event: RoundEvent, total_tickets: u64) -> Result<RoundStatus> {
        let next = match (self, event) {
            (RoundStatus::Created, RoundEvent::Open) => RoundStatus::Open,
            (RoundStatus::Open, RoundEvent::Close) if total_tickets < MIN_TICKETS_TO_DRAW => {
                RoundStatus::Refunded
            }
            (RoundStatus::Open, RoundEvent::Close) => RoundStatus::Closed,
            (RoundStatus::Closed, RoundEvent::Snapshot) => RoundStatus::Snapshot,
            (RoundStatus::Snapshot, RoundEvent::RequestRandomness) => RoundStatus::VrfRequested,
            (RoundStatus::VrfRequested, RoundEvent::Fulfill) => RoundStatus::Distributed,
            _ => return err!(LotteryError::InvalidRoundStatus),
        };
        Ok(next)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RoundStatus::Distributed | RoundStatus::Refunded)
    }
}

/// One prize slot awarded by the selection pass.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct WinnerAssignment {
    pub wallet: Pubkey,
    pub prize_tier: u8,
    pub slot_index: u8,
    pub request_id: Pubkey,
}

#[account]
#[derive(InitSpace, Default)]
pub struct Round {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Monotonic round identifier, taken from the config counter.
    pub id: u64,

    pub status: RoundStatus,

    /// UNIX timestamp at which ticket sales start.
    pub opens_at: i64,

    /// UNIX timestamp after which ticket sales stop.
    pub closes_at: i64,

    pub total_tickets: u64,

    /// Sum of participant weights. Never below `total_tickets`.
    pub total_weight: u64,

    /// Lamports wagered in this round.
    pub total_wagered: u64,

    /// Distinct wallets holding at least one ticket.
    pub participant_count: u32,

    /// Rollover balance moved into this round at creation.
    pub carried_over: u64,

    /// Key of the randomness account bound to the pending request.
    pub request_id: Pubkey,

    pub requested_at: i64,

    /// Exclusivity semantics frozen at snapshot time.
    pub selection_mode: SelectionMode,

    /// Zero until the snapshot is committed.
    pub participants_root: [u8; 32],

    /// Zero until winners are committed.
    pub winners_root: [u8; 32],

    /// Zero until randomness is fulfilled.
    pub seed: [u8; 32],

    pub fees_distributed: bool,

    #[max_len(10)]
    pub winners: Vec<WinnerAssignment>,

    /// Content id of the published participants file. Informational only.
    #[max_len(64)]
    pub participants_cid: String,

    /// Content id of the published winners file. Informational only.
    #[max_len(64)]
    pub winners_cid: String,
}

impl Round {
    pub fn require_status(&self, status: RoundStatus) -> Result<()> {
        require!(self.status == status, LotteryError::InvalidRoundStatus);
        Ok(())
    }

    /// Applies `event` and returns the new status.
    pub fn transition(&mut self, event: RoundEvent) -> Result<RoundStatus> {
        self.status = self.status.next(event, self.total_tickets)?;
        Ok(self.status)
    }

    /// Folds a participant's weight change into the round aggregates.
    pub fn apply_weight_change(
        &mut self,
        change: &WeightChange,
        tickets_added: u64,
        wagered_added: u64,
    ) -> Result<()> {
        self.require_status(RoundStatus::Open)?;
        if change.first_entry {
            require!(
                self.participant_count < MAX_PARTICIPANTS,
                LotteryError::RoundFull
            );
        }

        self.total_weight = self
            .total_weight
            .checked_sub(change.old_weight)
            .and_then(|w| w.checked_add(change.new_weight))
            .ok_or(LotteryError::MathOverflow)?;
        self.total_tickets = self
            .total_tickets
            .checked_add(tickets_added)
            .ok_or(LotteryError::MathOverflow)?;
        self.total_wagered = self
            .total_wagered
            .checked_add(wagered_added)
            .ok_or(LotteryError::MathOverflow)?;
        if change.first_entry {
            self.participant_count = self
                .participant_count
                .checked_add(1)
                .ok_or(LotteryError::MathOverflow)?;
        }
        Ok(())
    }

    /// Wagers plus the carried-over balance.
    pub fn pot(&self) -> Result<u64> {
        self.total_wagered
            .checked_add(self.carried_over)
            .ok_or_else(|| error!(LotteryError::MathOverflow))
    }

    /// `(fee, rollover)` shares of the pot; the rollover takes the rounding dust.
    pub fn fee_split(&self) -> Result<(u64, u64)> {
        let pot = self.pot()?;
        let fee = u128::from(pot)
            .checked_mul(u128::from(FEE_RECIPIENT_BPS))
            .map(|v| v / u128::from(BPS_DENOMINATOR))
            .and_then(|v| u64::try_from(v).ok())
            .ok_or(LotteryError::MathOverflow)?;
        Ok((fee, pot - fee))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(tickets: u64) -> Result<RoundStatus> {
        RoundStatus::Open.next(RoundEvent::Close, tickets)
    }

    #[test]
    fn test_forward_path() {
        let mut status = RoundStatus::Created;
        for event in [
            RoundEvent::Open,
            RoundEvent::Close,
            RoundEvent::Snapshot,
            RoundEvent::RequestRandomness,
            RoundEvent::Fulfill,
        ] {
            status = status.next(event, 10).unwrap();
        }
        assert_eq!(status, RoundStatus::Distributed);
        assert!(status.is_terminal());
    }

    #[test]
    fn test_close_below_threshold_refunds() {
        assert_eq!(close(9).unwrap(), RoundStatus::Refunded);
        assert_eq!(close(0).unwrap(), RoundStatus::Refunded);
        assert_eq!(close(10).unwrap(), RoundStatus::Closed);
        assert_eq!(close(11).unwrap(), RoundStatus::Closed);
    }

    #[test]
    fn test_no_skipping_or_going_back() {
        let illegal = [
            (RoundStatus::Created, RoundEvent::Close),
            (RoundStatus::Open, RoundEvent::Snapshot),
            (RoundStatus::Closed, RoundEvent::RequestRandomness),
            (RoundStatus::Snapshot, RoundEvent::Fulfill),
            (RoundStatus::Refunded, RoundEvent::Snapshot),
            (RoundStatus::Distributed, RoundEvent::Open),
            (RoundStatus::VrfRequested, RoundEvent::RequestRandomness),
        ];
        for (status, event) in illegal {
            assert_eq!(
                status.next(event, 100).unwrap_err(),
                LotteryError::InvalidRoundStatus.into(),
                "{:?} + {:?}",
                status,
                event
            );
        }
    }

    #[test]
    fn test_refunded_round_cannot_reach_snapshot() {
        let mut round = Round {
            status: RoundStatus::Open,
            total_tickets: 3,
            ..Default::default()
        };
        assert_eq!(round.transition(RoundEvent::Close).unwrap(), RoundStatus::Refunded);
        assert!(round.transition(RoundEvent::Snapshot).is_err());
        assert_eq!(round.status, RoundStatus::Refunded);
    }

    #[test]
    fn test_weight_change_requires_open_round() {
        let mut round = Round {
            status: RoundStatus::Snapshot,
            ..Default::default()
        };
        let change = WeightChange {
            old_weight: 0,
            new_weight: 5,
            first_entry: true,
        };
        assert!(round.apply_weight_change(&change, 5, 50).is_err());
        assert_eq!(round.total_weight, 0);
    }

    #[test]
    fn test_new_wallet_rejected_once_round_is_full() {
        let mut round = Round {
            status: RoundStatus::Open,
            participant_count: MAX_PARTICIPANTS - 1,
            ..Default::default()
        };
        let newcomer = WeightChange {
            old_weight: 0,
            new_weight: 1,
            first_entry: true,
        };
        round.apply_weight_change(&newcomer, 1, 10).unwrap();
        assert_eq!(round.participant_count, MAX_PARTICIPANTS);

        assert_eq!(
            round.apply_weight_change(&newcomer, 1, 10).unwrap_err(),
            LotteryError::RoundFull.into()
        );
        assert_eq!(round.participant_count, MAX_PARTICIPANTS);
        assert_eq!(round.total_tickets, 1);

        // wallets already in the round can keep buying
        let top_up = WeightChange {
            old_weight: 1,
            new_weight: 6,
            first_entry: false,
        };
        round.apply_weight_change(&top_up, 5, 50).unwrap();
        assert_eq!(round.total_tickets, 6);
        assert_eq!(round.total_weight, 6);
    }

    #[test]
    fn test_pot_includes_carried_over() {
        let round = Round {
            total_wagered: 1_000,
            carried_over: 250,
            ..Default::default()
        };
        assert_eq!(round.pot().unwrap(), 1_250);
    }

    #[test]
    fn test_fee_split_80_20() {
        let round = Round {
            total_wagered: 1_000,
            carried_over: 250,
            ..Default::default()
        };
        assert_eq!(round.fee_split().unwrap(), (1_000, 250));

        let odd = Round {
            total_wagered: 7,
            ..Default::default()
        };
        let (fee, rollover) = odd.fee_split().unwrap();
        assert_eq!(fee, 5);
        assert_eq!(rollover, 2);
    }
}
