use crate::domain::post::{Post, PostDetails};
use crate::domain::profile::Profile;

use super::dto::{PostDetailDto, PostSummaryDto, ProfileDetailDto, ProfileSummaryDto};

pub(crate) fn to_post_summary(post: Post) -> PostSummaryDto {
    PostSummaryDto {
        id: post.id,
        title: post.title,
        description: post.description,
        is_private: post.is_private,
        profile_id: post.profile_id,
        created_at: post.created_at,
    }
}

pub(crate) fn to_post_summaries(posts: Vec<Post>) -> Vec<PostSummaryDto> {
    posts.into_iter().map(to_post_summary).collect()
}

pub(crate) fn to_profile_summary(profile: Profile) -> ProfileSummaryDto {
    ProfileSummaryDto {
        id: profile.id,
        username: profile.username,
        bio: profile.bio,
        created_at: profile.created_at,
    }
}

pub(crate) fn to_post_detail(details: PostDetails) -> PostDetailDto {
    let PostDetails { post, owner } = details;

    PostDetailDto {
        id: post.id,
        title: post.title,
        description: post.description,
        is_private: post.is_private,
        created_at: post.created_at,
        updated_at: post.updated_at,
        profile: to_profile_summary(owner),
    }
}

pub(crate) fn to_profile_detail(profile: Profile, posts: Vec<Post>) -> ProfileDetailDto {
    ProfileDetailDto {
        profile: to_profile_summary(profile),
        posts: to_post_summaries(posts),
    }
}
