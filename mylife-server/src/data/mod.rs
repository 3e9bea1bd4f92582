pub(crate) mod post_repository;
pub(crate) mod profile_repository;
pub(crate) mod repositories;
pub(crate) mod user_repository;
