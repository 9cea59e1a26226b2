use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    // Validation
    #[msg("Ticket count must be one of the offered bundles")]
    InvalidTicketBundle,
    #[msg("Payment does not match the bundle price")]
    IncorrectPayment,
    #[msg("Purchase would exceed the per-wallet wager cap")]
    WagerCapExceeded,
    #[msg("Proof hash is empty or trivially derivable")]
    TrivialProofHash,
    #[msg("Wallet must hold a ticket before submitting a proof")]
    NoTicketsHeld,
    #[msg("A proof was already accepted for this wallet and round")]
    ProofAlreadySubmitted,
    #[msg("Round window is invalid")]
    InvalidRoundWindow,
    #[msg("Round is outside its ticket sale window")]
    OutsideSaleWindow,
    #[msg("Invalid prize slot index")]
    InvalidSlotIndex,
    #[msg("Prize tier does not match the slot")]
    PrizeTierMismatch,
    #[msg("Content id is too long")]
    ContentIdTooLong,
    #[msg("Invalid configuration value")]
    InvalidConfig,

    // State
    #[msg("Operation is not allowed in the current round status")]
    InvalidRoundStatus,
    #[msg("The previous round has not reached a terminal state")]
    PreviousRoundActive,
    #[msg("Round has reached its participant limit")]
    RoundFull,
    #[msg("Round has no tickets")]
    RoundHasNoTickets,
    #[msg("Participant accounts do not match the round")]
    ParticipantSetMismatch,
    #[msg("Participant set does not reproduce the committed root")]
    ParticipantsRootMismatch,
    #[msg("Program is paused")]
    ProgramPaused,

    // Authorization
    #[msg("Caller is not the configured authority")]
    Unauthorized,
    #[msg("Wallet is deny-listed")]
    WalletDenied,

    // Randomness
    #[msg("Randomness requests are cooling down")]
    RandomnessCooldown,
    #[msg("Fulfillment caller is not the randomness provider")]
    UnauthorizedProvider,
    #[msg("Request id does not match the pending request")]
    RequestIdMismatch,
    #[msg("Fulfillment arrived after the timeout window")]
    StaleFulfillment,
    #[msg("Pending request has not timed out yet")]
    RequestNotExpired,
    #[msg("Randomness value is zero")]
    ZeroRandomness,
    #[msg("Invalid randomness account data")]
    InvalidRandomnessData,
    #[msg("Randomness account was not committed in the previous slot")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness not yet resolved")]
    RandomnessNotResolved,
    #[msg("Delivered randomness differs from the revealed value")]
    RandomnessValueMismatch,

    // Proof
    #[msg("Invalid Merkle proof")]
    InvalidMerkleProof,

    // Double claim
    #[msg("Prize slot already claimed")]
    AlreadyClaimed,

    // Refund / transfer
    #[msg("Nothing to withdraw")]
    NothingToWithdraw,
    #[msg("Vault balance is insufficient")]
    InsufficientVaultBalance,
    #[msg("Math overflow")]
    MathOverflow,
}
