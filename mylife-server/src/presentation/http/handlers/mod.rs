pub(crate) mod auth;
pub(crate) mod posts;
pub(crate) mod profiles;
