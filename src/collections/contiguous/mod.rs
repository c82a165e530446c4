//! Contiguous collection types: [`Vector`] for a growable buffer and [`Stack`] for a
//! LIFO view composed over it.

pub mod stack;
pub mod vector;

pub(crate) mod raw;

#[doc(inline)]
pub use stack::Stack;
#[doc(inline)]
pub use vector::Vector;
