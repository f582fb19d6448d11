pub(crate) mod backend;
pub(crate) mod dump;
pub(crate) mod request;
