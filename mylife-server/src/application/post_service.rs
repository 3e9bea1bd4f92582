use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::data::profile_repository::ProfileRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, UpdatePostRequest};

use super::authenticated_profile::AuthenticatedProfileService;
use super::dto::{PostDetailDto, PostIdDto, PostsPayload};
use super::mappers::{to_post_detail, to_post_summaries};
use super::outcome::{ONLY_CREATOR_CAN_DELETE, ONLY_CREATOR_CAN_UPDATE, Outcome, POST_NOT_FOUND};

pub(crate) struct PostService<P: PostRepository, R: ProfileRepository> {
    posts: P,
    identity: AuthenticatedProfileService<R>,
}

impl<P: PostRepository, R: ProfileRepository> PostService<P, R> {
    pub(crate) fn new(posts: P, identity: AuthenticatedProfileService<R>) -> Self {
        Self { posts, identity }
    }

    pub(crate) async fn get_public_posts(&self) -> Result<Outcome<PostsPayload>, DomainError> {
        let posts = self.posts.get_public_posts().await?;

        Ok(Outcome::Ok(PostsPayload {
            posts: to_post_summaries(posts),
        }))
    }

    pub(crate) async fn get_post_by_id(
        &self,
        post_id: Uuid,
    ) -> Result<Outcome<PostDetailDto>, DomainError> {
        if !self.posts.post_exists(post_id).await? {
            return Ok(Outcome::NotFound(POST_NOT_FOUND));
        }

        // may vanish between the two queries
        let Some(details) = self.posts.get_post_details(post_id).await? else {
            return Ok(Outcome::NotFound(POST_NOT_FOUND));
        };

        Ok(Outcome::Ok(to_post_detail(details)))
    }

    #[instrument(skip(self, req))]
    pub(crate) async fn create_post(
        &self,
        actor_user_id: Uuid,
        req: CreatePostRequest,
    ) -> Result<Outcome<PostIdDto>, DomainError> {
        let profile = self
            .identity
            .get_authenticated_profile(actor_user_id)
            .await?;

        let req = match req.validate() {
            Ok(req) => req,
            Err(err) => return invalid(err),
        };

        let new_post = NewPost {
            title: req.title,
            description: req.description,
            is_private: req.is_private,
            profile_id: profile.id,
        };
        let created = self.posts.create(new_post).await?;

        info!(post_id = %created.id, profile_id = %profile.id, "post created");
        Ok(Outcome::Created(PostIdDto { id: created.id }))
    }

    #[instrument(skip(self, req))]
    pub(crate) async fn update_post(
        &self,
        actor_user_id: Uuid,
        post_id: Uuid,
        req: UpdatePostRequest,
    ) -> Result<Outcome<PostIdDto>, DomainError> {
        let profile = self
            .identity
            .get_authenticated_profile(actor_user_id)
            .await?;

        if !self.posts.post_exists(post_id).await? {
            return Ok(Outcome::NotFound(POST_NOT_FOUND));
        }
        let Some(mut post) = self.posts.get_by_id(post_id).await? else {
            return Ok(Outcome::NotFound(POST_NOT_FOUND));
        };

        if !post.is_owned_by(&profile) {
            warn!(%post_id, profile_id = %profile.id, "update rejected: caller is not the creator");
            return Ok(Outcome::Forbidden(ONLY_CREATOR_CAN_UPDATE));
        }

        let req = match req.validate() {
            Ok(req) => req,
            Err(err) => return invalid(err),
        };

        post.apply_update(req);
        let saved = self.posts.save(&post).await?;

        info!(%post_id, "post updated");
        Ok(Outcome::Updated(PostIdDto { id: saved.id }))
    }

    #[instrument(skip(self))]
    pub(crate) async fn delete_post(
        &self,
        actor_user_id: Uuid,
        post_id: Uuid,
    ) -> Result<Outcome<()>, DomainError> {
        let profile = self
            .identity
            .get_authenticated_profile(actor_user_id)
            .await?;

        let Some(post) = self.posts.get_by_id(post_id).await? else {
            return Ok(Outcome::NotFound(POST_NOT_FOUND));
        };

        if !post.is_owned_by(&profile) {
            warn!(%post_id, profile_id = %profile.id, "delete rejected: caller is not the creator");
            return Ok(Outcome::Forbidden(ONLY_CREATOR_CAN_DELETE));
        }

        if !self.posts.delete(post_id).await? {
            return Ok(Outcome::NotFound(POST_NOT_FOUND));
        }

        info!(%post_id, "post deleted");
        Ok(Outcome::Deleted)
    }
}

/// Turns a request validation failure into a 400 outcome; anything else propagates.
fn invalid<T>(err: DomainError) -> Result<Outcome<T>, DomainError> {
    match err {
        DomainError::Validation { field, message } => {
            Ok(Outcome::Invalid(vec![format!("{field}: {message}")]))
        }
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::PostService;
    use crate::application::authenticated_profile::AuthenticatedProfileService;
    use crate::application::dto::PostIdDto;
    use crate::application::fakes::{FakePostRepo, FakeProfileRepo};
    use crate::application::outcome::Outcome;
    use crate::domain::error::DomainError;
    use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};
    use crate::domain::profile::Profile;

    struct Fixture {
        p1: Profile,
        p2: Profile,
        repo: FakePostRepo,
        service: PostService<FakePostRepo, FakeProfileRepo>,
    }

    fn fixture() -> Fixture {
        let p1 = sample_profile("first_user");
        let p2 = sample_profile("second_user");
        let profiles = FakeProfileRepo::with(&[p1.clone(), p2.clone()]);
        let repo = FakePostRepo::new(profiles.clone());
        let service = PostService::new(
            repo.clone(),
            AuthenticatedProfileService::new(profiles),
        );

        Fixture {
            p1,
            p2,
            repo,
            service,
        }
    }

    fn sample_profile(username: &str) -> Profile {
        Profile::new(Uuid::new_v4(), Uuid::new_v4(), username, None, Utc::now())
            .expect("sample profile must be valid")
    }

    fn sample_post(title: &str, is_private: bool, owner: &Profile) -> Post {
        let now = Utc::now();
        Post::new(
            Uuid::new_v4(),
            title,
            format!("{title} description"),
            is_private,
            owner.id,
            now,
            now,
        )
        .expect("sample post must be valid")
    }

    fn testing_create_request() -> CreatePostRequest {
        CreatePostRequest {
            title: "Testing".to_string(),
            description: "Testing description".to_string(),
            is_private: false,
        }
    }

    fn testing_update_request() -> UpdatePostRequest {
        UpdatePostRequest {
            title: "Testing title".to_string(),
            description: "Testing update description".to_string(),
            is_private: false,
        }
    }

    #[tokio::test]
    async fn get_public_posts_returns_every_public_post() {
        let fx = fixture();
        let public_a = sample_post("public a", false, &fx.p1);
        let public_b = sample_post("public b", false, &fx.p2);
        fx.repo.insert(public_a.clone());
        fx.repo.insert(sample_post("secret", true, &fx.p1));
        fx.repo.insert(public_b.clone());

        let envelope = fx
            .service
            .get_public_posts()
            .await
            .expect("listing must succeed")
            .into_envelope();

        assert_eq!(envelope.status_code(), 200);
        assert!(envelope.is_success());
        assert_eq!(envelope.message(), "Success");

        let ids = envelope
            .payload()
            .expect("payload must be present")
            .posts
            .iter()
            .map(|post| post.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![public_a.id, public_b.id]);
    }

    #[tokio::test]
    async fn get_public_posts_propagates_repository_fault() {
        let fx = fixture();
        fx.repo.break_connection();

        let err = fx
            .service
            .get_public_posts()
            .await
            .expect_err("fault must propagate");
        assert!(matches!(err, DomainError::Unexpected(_)));
    }

    #[tokio::test]
    async fn get_post_by_id_returns_not_found_for_unknown_id() {
        let fx = fixture();

        let envelope = fx
            .service
            .get_post_by_id(Uuid::new_v4())
            .await
            .expect("lookup must not fault")
            .into_envelope();

        assert_eq!(envelope.status_code(), 404);
        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), "Post not found");
        assert!(envelope.payload().is_none());
    }

    #[tokio::test]
    async fn get_post_by_id_embeds_owner_profile() {
        let fx = fixture();
        let post = sample_post("mine", false, &fx.p1);
        fx.repo.insert(post.clone());

        let envelope = fx
            .service
            .get_post_by_id(post.id)
            .await
            .expect("lookup must succeed")
            .into_envelope();

        assert_eq!(envelope.status_code(), 200);
        assert!(envelope.is_success());
        assert_eq!(envelope.message(), "Success");

        let detail = envelope.payload().expect("payload must be present");
        assert_eq!(detail.title, post.title);
        assert_eq!(detail.description, post.description);
        assert_eq!(detail.profile.id, fx.p1.id);
        assert_eq!(detail.profile.username, "first_user");
    }

    #[tokio::test]
    async fn create_post_owner_is_the_authenticated_profile() {
        let fx = fixture();

        let outcome = fx
            .service
            .create_post(fx.p1.user_id, testing_create_request())
            .await
            .expect("create must succeed");
        let envelope = outcome.into_envelope();

        assert_eq!(envelope.status_code(), 201);
        assert!(envelope.is_success());
        assert_eq!(envelope.message(), "Post successfully created.");

        let input = fx
            .repo
            .created_input()
            .expect("repo input must be captured");
        assert_eq!(input.profile_id, fx.p1.id);
        assert_eq!(input.title, "Testing");
        assert_eq!(input.description, "Testing description");
        assert!(!input.is_private);
    }

    #[tokio::test]
    async fn create_post_without_profile_is_unauthenticated() {
        let fx = fixture();

        let err = fx
            .service
            .create_post(Uuid::new_v4(), testing_create_request())
            .await
            .expect_err("must fail without profile");
        assert!(matches!(err, DomainError::Unauthenticated));
        assert!(fx.repo.created_input().is_none());
    }

    #[tokio::test]
    async fn create_post_rejects_blank_title_without_persisting() {
        let fx = fixture();
        let req = CreatePostRequest {
            title: "   ".to_string(),
            ..testing_create_request()
        };

        let outcome = fx
            .service
            .create_post(fx.p1.user_id, req)
            .await
            .expect("validation is not a fault");

        assert_eq!(
            outcome,
            Outcome::Invalid(vec!["title: must be 1..255 chars".to_string()])
        );
        let envelope = outcome.into_envelope();
        assert_eq!(envelope.status_code(), 400);
        assert_eq!(envelope.errors(), ["title: must be 1..255 chars"]);
        assert!(fx.repo.created_input().is_none());
    }

    #[tokio::test]
    async fn created_post_round_trips_through_get_by_id() {
        let fx = fixture();
        let req = CreatePostRequest {
            title: "  Round trip  ".to_string(),
            description: "kept as submitted".to_string(),
            is_private: true,
        };

        let Outcome::Created(PostIdDto { id }) = fx
            .service
            .create_post(fx.p1.user_id, req)
            .await
            .expect("create must succeed")
        else {
            panic!("expected Created outcome");
        };

        let Outcome::Ok(detail) = fx
            .service
            .get_post_by_id(id)
            .await
            .expect("lookup must succeed")
        else {
            panic!("expected Ok outcome");
        };

        assert_eq!(detail.title, "Round trip");
        assert_eq!(detail.description, "kept as submitted");
        assert!(detail.is_private);
        assert_eq!(detail.profile.id, fx.p1.id);
    }

    #[tokio::test]
    async fn update_post_unknown_id_is_not_found_and_not_success() {
        let fx = fixture();

        let envelope = fx
            .service
            .update_post(fx.p1.user_id, Uuid::new_v4(), testing_update_request())
            .await
            .expect("lookup must not fault")
            .into_envelope();

        assert_eq!(envelope.status_code(), 404);
        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), "Post not found");
        assert!(fx.repo.saved().is_empty());
    }

    #[tokio::test]
    async fn update_post_by_creator_saves_new_fields() {
        let fx = fixture();
        let post = sample_post("old", false, &fx.p1);
        fx.repo.insert(post.clone());

        let req = UpdatePostRequest {
            is_private: true,
            ..testing_update_request()
        };
        let envelope = fx
            .service
            .update_post(fx.p1.user_id, post.id, req)
            .await
            .expect("update must succeed")
            .into_envelope();

        assert_eq!(envelope.status_code(), 200);
        assert!(envelope.is_success());
        assert_eq!(envelope.message(), "Post Successfully Updated");

        let saved = fx.repo.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, post.id);
        assert_eq!(saved[0].profile_id, fx.p1.id);
        assert_eq!(saved[0].title, "Testing title");
        assert_eq!(saved[0].description, "Testing update description");
        assert!(saved[0].is_private);
    }

    #[tokio::test]
    async fn update_post_by_someone_else_is_forbidden() {
        let fx = fixture();

        let Outcome::Created(PostIdDto { id }) = fx
            .service
            .create_post(fx.p1.user_id, testing_create_request())
            .await
            .expect("create must succeed")
        else {
            panic!("expected Created outcome");
        };

        let envelope = fx
            .service
            .update_post(fx.p2.user_id, id, testing_update_request())
            .await
            .expect("guard is not a fault")
            .into_envelope();

        assert_eq!(envelope.status_code(), 403);
        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), "Only post creator can update the post.");
        assert!(fx.repo.saved().is_empty());

        let stored = fx.repo.find(id).expect("post must still exist");
        assert_eq!(stored.title, "Testing");
    }

    #[tokio::test]
    async fn update_post_with_invalid_fields_is_rejected_after_ownership() {
        let fx = fixture();
        let post = sample_post("old", false, &fx.p1);
        fx.repo.insert(post.clone());

        let req = UpdatePostRequest {
            description: "  ".to_string(),
            ..testing_update_request()
        };
        let outcome = fx
            .service
            .update_post(fx.p1.user_id, post.id, req)
            .await
            .expect("validation is not a fault");

        assert!(matches!(outcome, Outcome::Invalid(_)));
        assert!(fx.repo.saved().is_empty());
    }

    #[tokio::test]
    async fn delete_post_by_someone_else_is_forbidden() {
        let fx = fixture();
        let post = sample_post("keep me", false, &fx.p1);
        fx.repo.insert(post.clone());

        let outcome = fx
            .service
            .delete_post(fx.p2.user_id, post.id)
            .await
            .expect("guard is not a fault");

        assert_eq!(
            outcome,
            Outcome::Forbidden("Only post creator can delete the post.")
        );
        assert!(fx.repo.find(post.id).is_some());
        assert!(fx.repo.deleted().is_empty());
    }

    #[tokio::test]
    async fn delete_post_by_creator_removes_it() {
        let fx = fixture();
        let post = sample_post("bye", false, &fx.p1);
        fx.repo.insert(post.clone());

        let envelope = fx
            .service
            .delete_post(fx.p1.user_id, post.id)
            .await
            .expect("delete must succeed")
            .into_envelope();

        assert_eq!(envelope.status_code(), 200);
        assert_eq!(envelope.message(), "Post successfully deleted.");
        assert!(fx.repo.find(post.id).is_none());

        let again = fx
            .service
            .get_post_by_id(post.id)
            .await
            .expect("lookup must not fault");
        assert!(matches!(again, Outcome::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_post_unknown_id_is_not_found() {
        let fx = fixture();
        let post = sample_post("untouched", false, &fx.p1);
        fx.repo.insert(post.clone());

        let envelope = fx
            .service
            .delete_post(fx.p1.user_id, Uuid::new_v4())
            .await
            .expect("lookup must not fault")
            .into_envelope();

        assert_eq!(envelope.status_code(), 404);
        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), "Post not found");
        assert!(fx.repo.deleted().is_empty());
        assert!(fx.repo.find(post.id).is_some());
    }

    #[tokio::test]
    async fn update_and_delete_without_profile_are_unauthenticated() {
        let fx = fixture();
        let post = sample_post("guarded", false, &fx.p1);
        fx.repo.insert(post.clone());
        let stranger = Uuid::new_v4();

        let err = fx
            .service
            .update_post(stranger, post.id, testing_update_request())
            .await
            .expect_err("update must fail without profile");
        assert!(matches!(err, DomainError::Unauthenticated));
        assert!(fx.repo.saved().is_empty());

        let err = fx
            .service
            .delete_post(stranger, post.id)
            .await
            .expect_err("delete must fail without profile");
        assert!(matches!(err, DomainError::Unauthenticated));
        assert!(fx.repo.deleted().is_empty());
        assert_eq!(
            fx.repo.find(post.id).expect("post must still exist").title,
            "guarded"
        );
    }
}
