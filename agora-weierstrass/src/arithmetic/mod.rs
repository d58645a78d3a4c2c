mod field;
mod modular;
mod point;

pub use field::PrimeField;
pub use modular::{mul_mod, Modular};
pub use point::Point;
