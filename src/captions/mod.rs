pub(crate) mod resolve;
pub(crate) mod search;
pub(crate) mod split;
pub(crate) mod trim;
pub(crate) mod whisper;
