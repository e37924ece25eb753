pub(crate) mod commands;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod manifest;
pub(crate) mod mapping;
pub(crate) mod pipeline;
pub(crate) mod providers;
pub(crate) mod resolve;
pub(crate) mod source_root;
pub(crate) mod translate;
pub(crate) mod uri;
pub(crate) mod user_interface;
