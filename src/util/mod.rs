pub mod arith;
pub mod error;
pub mod panic;
pub mod wipe;

#[cfg(test)]
pub mod testing;
