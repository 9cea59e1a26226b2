pub mod admin;
pub mod claim_prize;
pub mod fulfill_randomness;
pub mod lifecycle;
pub mod participant_set;
pub mod place_tickets;
pub mod request_randomness;
pub mod submit_proof;
pub mod withdraw_refund;

pub use admin::*;
pub use claim_prize::*;
pub use fulfill_randomness::*;
pub use lifecycle::*;
pub use place_tickets::*;
pub use request_randomness::*;
pub use submit_proof::*;
pub use withdraw_refund::*;
