pub(crate) mod auth_service;
pub(crate) mod authenticated_profile;
pub(crate) mod dto;
pub(crate) mod mappers;
pub(crate) mod outcome;
pub(crate) mod post_service;
pub(crate) mod profile_service;

#[cfg(test)]
pub(crate) mod fakes;
