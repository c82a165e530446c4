//! A list with links in both directions, addressed through stable handles.

pub mod iter;
pub mod list2;

pub(crate) mod slot;

mod tests;

#[doc(inline)]
pub use iter::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list2::{List2, NodeHandle};

#[doc(inline)]
pub use crate::util::error::{AllocError, List2Error, StaleHandle};
