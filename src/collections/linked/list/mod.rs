//! A list with links in one direction.

pub mod iter;
pub mod list;

pub(crate) mod node;

mod tests;

#[doc(inline)]
pub use iter::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

#[doc(inline)]
pub use crate::util::error::AllocError;
