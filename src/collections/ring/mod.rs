//! A fixed capacity FIFO ring buffer with inline storage.

pub mod ring;


#[doc(inline)]
pub use ring::{Iter, Ring};

#[doc(inline)]
pub use crate::util::error::{Empty, Full};
