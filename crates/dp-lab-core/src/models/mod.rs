//! Domain models for the lab record keeper.

mod clinic;
mod finance;
mod inventory;
mod job;
mod price;
mod record;

pub mod dates;
pub mod money;

pub use clinic::*;
pub use finance::*;
pub use inventory::*;
pub use job::*;
pub use price::*;
pub use record::*;
