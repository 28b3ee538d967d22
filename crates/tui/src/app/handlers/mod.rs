pub(crate) mod form;
pub(crate) mod keys;

pub(crate) use keys::{handle_key, handle_paste};
