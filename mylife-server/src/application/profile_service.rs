use uuid::Uuid;

use crate::data::post_repository::PostRepository;
use crate::data::profile_repository::ProfileRepository;
use crate::domain::error::DomainError;

use super::authenticated_profile::AuthenticatedProfileService;
use super::dto::ProfileDetailDto;
use super::mappers::to_profile_detail;
use super::outcome::{Outcome, PROFILE_NOT_FOUND};

pub(crate) struct ProfileService<P: PostRepository, R: ProfileRepository> {
    posts: P,
    profiles: R,
    identity: AuthenticatedProfileService<R>,
}

impl<P: PostRepository, R: ProfileRepository + Clone> ProfileService<P, R> {
    pub(crate) fn new(posts: P, profiles: R) -> Self {
        let identity = AuthenticatedProfileService::new(profiles.clone());
        Self {
            posts,
            profiles,
            identity,
        }
    }

    /// Public view of a profile: private posts are left out.
    pub(crate) async fn get_profile(
        &self,
        profile_id: Uuid,
    ) -> Result<Outcome<ProfileDetailDto>, DomainError> {
        if !self.profiles.profile_exists(profile_id).await? {
            return Ok(Outcome::NotFound(PROFILE_NOT_FOUND));
        }
        let Some(profile) = self.profiles.get_by_id(profile_id).await? else {
            return Ok(Outcome::NotFound(PROFILE_NOT_FOUND));
        };

        let posts = self.posts.get_posts_by_profile(profile.id, false).await?;
        Ok(Outcome::Ok(to_profile_detail(profile, posts)))
    }

    pub(crate) async fn get_my_profile(
        &self,
        actor_user_id: Uuid,
    ) -> Result<Outcome<ProfileDetailDto>, DomainError> {
        let profile = self
            .identity
            .get_authenticated_profile(actor_user_id)
            .await?;

        let posts = self.posts.get_posts_by_profile(profile.id, true).await?;
        Ok(Outcome::Ok(to_profile_detail(profile, posts)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::ProfileService;
    use crate::application::fakes::{FakePostRepo, FakeProfileRepo};
    use crate::application::outcome::Outcome;
    use crate::domain::error::DomainError;
    use crate::domain::post::Post;
    use crate::domain::profile::Profile;

    fn setup() -> (ProfileService<FakePostRepo, FakeProfileRepo>, Profile, FakePostRepo) {
        let profile = Profile::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "writer",
            Some("writes things".to_string()),
            Utc::now(),
        )
        .expect("profile must be valid");
        let profiles = FakeProfileRepo::with(std::slice::from_ref(&profile));
        let posts = FakePostRepo::new(profiles.clone());

        for (title, is_private) in [("open", false), ("diary", true)] {
            let now = Utc::now();
            posts.insert(
                Post::new(Uuid::new_v4(), title, "body", is_private, profile.id, now, now)
                    .expect("post must be valid"),
            );
        }

        (ProfileService::new(posts.clone(), profiles), profile, posts)
    }

    #[tokio::test]
    async fn get_profile_hides_private_posts() {
        let (service, profile, _) = setup();

        let Outcome::Ok(detail) = service
            .get_profile(profile.id)
            .await
            .expect("lookup must succeed")
        else {
            panic!("expected Ok outcome");
        };

        assert_eq!(detail.profile.username, "writer");
        assert_eq!(detail.profile.bio.as_deref(), Some("writes things"));
        let titles = detail
            .posts
            .iter()
            .map(|post| post.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["open"]);
    }

    #[tokio::test]
    async fn get_profile_unknown_id_is_not_found() {
        let (service, _, _) = setup();

        let envelope = service
            .get_profile(Uuid::new_v4())
            .await
            .expect("lookup must not fault")
            .into_envelope();

        assert_eq!(envelope.status_code(), 404);
        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), "Profile not found");
    }

    #[tokio::test]
    async fn get_my_profile_includes_private_posts() {
        let (service, profile, _) = setup();

        let Outcome::Ok(detail) = service
            .get_my_profile(profile.user_id)
            .await
            .expect("lookup must succeed")
        else {
            panic!("expected Ok outcome");
        };

        assert_eq!(detail.profile.id, profile.id);
        assert_eq!(detail.posts.len(), 2);
    }

    #[tokio::test]
    async fn get_my_profile_requires_a_profile() {
        let (service, _, _) = setup();

        let err = service
            .get_my_profile(Uuid::new_v4())
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::Unauthenticated));
    }

    #[tokio::test]
    async fn repository_fault_propagates() {
        let (service, profile, posts) = setup();
        posts.break_connection();

        let err = service
            .get_profile(profile.id)
            .await
            .expect_err("fault must propagate");
        assert!(matches!(err, DomainError::Unexpected(_)));
    }
}
