pub mod error;
pub mod int;
pub mod nat;
pub mod random;

mod ops;

pub use error::NumError;
pub use int::Int;
pub use nat::Nat;
pub use random::{IntRange, NatRange};
