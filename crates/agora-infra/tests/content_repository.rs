//! Behaviour of the content repository over the in-memory store.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use uuid::Uuid;

use agora_core::domain::{NewPost, PostChanges, PostFilters, PostStatus, Profile, Role};
use agora_core::ports::Clock;
use agora_core::{ContentRepository, Lookup, RepoError};
use agora_infra::InMemoryStore;

/// Advances one second per reading so every write gets a distinct stamp.
struct SteppingClock(Mutex<DateTime<Utc>>);

impl SteppingClock {
    fn new() -> Self {
        Self(Mutex::new(Utc.with_ymd_and_hms(2026, 9, 1, 8, 0, 0).unwrap()))
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self.0.lock().unwrap();
        *current += TimeDelta::seconds(1);
        *current
    }
}

struct Fixture {
    store: Arc<InMemoryStore>,
    repo: ContentRepository,
    author: Profile,
}

async fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let mut author = Profile::new(
        Uuid::new_v4(),
        Some("ferris".to_string()),
        Some("ferris@school.test".to_string()),
    );
    author.full_name = Some("Ferris Crab".to_string());
    author.created_at = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap();
    author.updated_at = author.created_at;
    store.put_profile(author.clone()).await;

    let repo = ContentRepository::new(store.clone(), store.clone())
        .with_clock(Arc::new(SteppingClock::new()));

    Fixture {
        store,
        repo,
        author,
    }
}

fn new_post(user_id: Uuid, title: &str, content: &str) -> NewPost {
    NewPost {
        user_id,
        title: title.to_string(),
        content: content.to_string(),
        category: None,
        status: None,
    }
}

#[tokio::test]
async fn create_then_get_round_trips_supplied_fields() {
    let f = fixture().await;

    let created = f
        .repo
        .create_post(NewPost {
            category: Some("Tutorial".to_string()),
            status: Some(PostStatus::Published),
            ..new_post(f.author.id, "Intro to Rust", "Ownership, borrowing and lifetimes")
        })
        .await
        .unwrap();

    let fetched = f.repo.get_post(created.id).await.unwrap();
    assert_eq!(fetched.post, created);
    assert_eq!(fetched.post.user_id, f.author.id);
    assert_eq!(fetched.post.title, "Intro to Rust");
    assert_eq!(fetched.post.content, "Ownership, borrowing and lifetimes");
    assert_eq!(fetched.post.category.as_deref(), Some("Tutorial"));
    assert_eq!(fetched.post.status, PostStatus::Published);
    assert_eq!(fetched.post.created_at, fetched.post.updated_at);

    let author = fetched.author.unwrap();
    assert_eq!(author.username.as_deref(), Some("ferris"));
    assert_eq!(author.full_name.as_deref(), Some("Ferris Crab"));
}

#[tokio::test]
async fn create_assigns_fresh_ids_and_defaults() {
    let f = fixture().await;

    let first = f
        .repo
        .create_post(new_post(f.author.id, "One", "First of two posts"))
        .await
        .unwrap();
    let second = f
        .repo
        .create_post(new_post(f.author.id, "Two", "Second of two posts"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert!(second.created_at > first.created_at);
    assert_eq!(first.status, PostStatus::Draft);
    assert_eq!(first.category, None);
}

#[tokio::test]
async fn create_for_unknown_author_surfaces_error() {
    let f = fixture().await;

    let result = f
        .repo
        .create_post(new_post(Uuid::new_v4(), "Ghost", "Nobody wrote this"))
        .await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn publishing_bumps_updated_at() {
    let f = fixture().await;
    let created = f
        .repo
        .create_post(new_post(f.author.id, "Reading list", "Books for the spring term"))
        .await
        .unwrap();

    f.repo
        .update_post(
            created.id,
            PostChanges {
                status: Some(PostStatus::Published),
                ..PostChanges::default()
            },
        )
        .await
        .unwrap();

    let fetched = f.repo.get_post(created.id).await.unwrap().post;
    assert_eq!(fetched.status, PostStatus::Published);
    assert!(fetched.updated_at > created.updated_at);
    assert_eq!(fetched.created_at, created.created_at);
    assert_eq!(fetched.title, "Reading list");

    f.repo
        .update_post(
            created.id,
            PostChanges {
                status: Some(PostStatus::Draft),
                ..PostChanges::default()
            },
        )
        .await
        .unwrap();
    let reverted = f.repo.get_post(created.id).await.unwrap().post;
    assert_eq!(reverted.status, PostStatus::Draft);
}

#[tokio::test]
async fn update_without_category_clears_it() {
    let f = fixture().await;
    let created = f
        .repo
        .create_post(NewPost {
            category: Some("Question".to_string()),
            ..new_post(f.author.id, "Homework help", "How do I factor quadratics?")
        })
        .await
        .unwrap();

    f.repo
        .update_post(
            created.id,
            PostChanges {
                title: Some("Homework help please".to_string()),
                ..PostChanges::default()
            },
        )
        .await
        .unwrap();

    let fetched = f.repo.get_post(created.id).await.unwrap().post;
    assert_eq!(fetched.title, "Homework help please");
    assert_eq!(fetched.content, "How do I factor quadratics?");
    assert_eq!(fetched.category, None);
}

#[tokio::test]
async fn delete_then_get_yields_nothing() {
    let f = fixture().await;
    let created = f
        .repo
        .create_post(new_post(f.author.id, "Temporary", "This will be removed"))
        .await
        .unwrap();

    f.repo.delete_post(created.id).await.unwrap();

    assert!(f.repo.get_post(created.id).await.is_none());
    assert!(matches!(
        f.repo.lookup_post(created.id).await,
        Lookup::NotFound
    ));
    assert!(matches!(
        f.repo.delete_post(created.id).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn search_matches_title_or_content_case_insensitively() {
    let f = fixture().await;
    let rust = f
        .repo
        .create_post(new_post(f.author.id, "Intro to Rust", "Week one material"))
        .await
        .unwrap();
    f.repo
        .create_post(new_post(f.author.id, "Intro to Zoology", "Week one material"))
        .await
        .unwrap();
    let by_content = f
        .repo
        .create_post(new_post(f.author.id, "Systems club", "We are learning RUST together"))
        .await
        .unwrap();

    let found = f.repo.get_posts(&PostFilters::default().search("rust")).await;
    let ids: Vec<Uuid> = found.iter().map(|p| p.post.id).collect();

    assert_eq!(ids, vec![by_content.id, rust.id]);
}

#[tokio::test]
async fn filtered_listings_are_ordered_subsets() {
    let f = fixture().await;
    let categories = ["Tutorial", "Question", "Tutorial", "General"];
    for (i, category) in categories.iter().enumerate() {
        let status = if i % 2 == 0 {
            PostStatus::Published
        } else {
            PostStatus::Draft
        };
        f.repo
            .create_post(NewPost {
                category: Some(category.to_string()),
                status: Some(status),
                ..new_post(f.author.id, &format!("Lesson {i}"), "Shared lesson material")
            })
            .await
            .unwrap();
    }

    let all = f.repo.get_posts(&PostFilters::default()).await;
    assert_eq!(all.len(), 4);
    assert!(all
        .windows(2)
        .all(|w| w[0].post.created_at > w[1].post.created_at));

    let filter_sets = [
        PostFilters::default().category("Tutorial"),
        PostFilters::default().status(PostStatus::Published),
        PostFilters::default()
            .category("Tutorial")
            .status(PostStatus::Published)
            .search("lesson"),
        PostFilters::default().search("nothing matches this"),
    ];

    for filters in &filter_sets {
        let subset = f.repo.get_posts(filters).await;
        assert!(subset.iter().all(|p| all.contains(p)));
        assert!(subset
            .windows(2)
            .all(|w| w[0].post.created_at >= w[1].post.created_at));
    }

    let tutorials = f
        .repo
        .get_posts(&PostFilters::default().category("Tutorial"))
        .await;
    assert_eq!(tutorials.len(), 2);

    let published_tutorials = f
        .repo
        .get_posts(
            &PostFilters::default()
                .category("Tutorial")
                .status(PostStatus::Published),
        )
        .await;
    assert_eq!(published_tutorials.len(), 2);

    let drafts = f
        .repo
        .get_posts(&PostFilters::default().status(PostStatus::Draft))
        .await;
    assert_eq!(drafts.len(), 2);
}

#[tokio::test]
async fn user_posts_are_limited_to_one_owner() {
    let f = fixture().await;
    let other = Profile::new(Uuid::new_v4(), Some("grace".to_string()), None);
    f.store.put_profile(other.clone()).await;

    f.repo
        .create_post(new_post(f.author.id, "Mine", "Written by ferris"))
        .await
        .unwrap();
    f.repo
        .create_post(new_post(other.id, "Theirs", "Written by grace"))
        .await
        .unwrap();

    let mine = f.repo.get_user_posts(f.author.id).await;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].post.title, "Mine");
    assert_eq!(
        mine[0].author.as_ref().and_then(|a| a.username.as_deref()),
        Some("ferris")
    );
}

#[tokio::test]
async fn profile_updates_only_touch_name_and_bio() {
    let f = fixture().await;

    f.repo
        .update_profile(
            f.author.id,
            agora_core::domain::ProfileChanges::new(None, Some("Teaches systems".to_string())),
        )
        .await
        .unwrap();

    let profile = f.repo.get_profile(f.author.id).await.unwrap();
    assert_eq!(profile.full_name, None);
    assert_eq!(profile.bio.as_deref(), Some("Teaches systems"));
    assert_eq!(profile.username, f.author.username);
    assert_eq!(profile.email, f.author.email);
    assert_eq!(profile.role, Role::User);
    assert!(profile.updated_at > f.author.updated_at);
}

#[tokio::test]
async fn missing_profile_is_absent_not_error() {
    let f = fixture().await;

    assert!(f.repo.get_profile(Uuid::new_v4()).await.is_none());
    assert!(matches!(
        f.repo
            .update_profile(Uuid::new_v4(), Default::default())
            .await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn profiles_are_listed_newest_first() {
    let f = fixture().await;
    let mut newer = Profile::new(Uuid::new_v4(), Some("newcomer".to_string()), None);
    newer.created_at = f.author.created_at + TimeDelta::days(1);
    f.store.put_profile(newer.clone()).await;

    let profiles = f.repo.get_all_profiles().await;
    let ids: Vec<Uuid> = profiles.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newer.id, f.author.id]);
}

#[tokio::test]
async fn repository_does_not_guard_role_changes() {
    let f = fixture().await;

    // Self-promotion is only refused by the admin handler, not here.
    f.repo
        .update_user_role(f.author.id, Role::Admin)
        .await
        .unwrap();

    let profile = f.repo.get_profile(f.author.id).await.unwrap();
    assert_eq!(profile.role, Role::Admin);
}
