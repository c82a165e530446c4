//! Linked collection types: [`List`] with links in one direction and [`List2`] with
//! links in both, addressed through stable [`NodeHandle`]s.

pub mod list;
pub mod list2;

#[doc(inline)]
pub use list::List;
#[doc(inline)]
pub use list2::{List2, NodeHandle};
