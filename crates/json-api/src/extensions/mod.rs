//! Extension traits

mod depot;
mod identity;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use identity::IdentityExt as _;
pub(crate) use result::ResultExt as _;
