pub(crate) mod config;
pub(crate) mod lookup;
pub(crate) mod resolve;
pub(crate) mod validate;
