//! Payment Handlers

pub(crate) mod notify;
pub(crate) mod pay_url;
