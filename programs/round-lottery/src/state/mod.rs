pub mod config;
pub mod denylist;
pub mod ledger;
pub mod participant;
pub mod round;

pub use config::*;
pub use denylist::*;
pub use ledger::*;
pub use participant::*;
pub use round::*;
