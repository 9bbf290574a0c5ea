//! Behavioural coverage for the in-memory social store.
//!
//! Several ports share method names (`create`, `find_by_id`, `delete`), so
//! calls are spelled with the trait path.

use super::*;
use crate::domain::{MediaType, MediaUrl, PasswordHash, PersonName, SelfFollowPolicy};
use rstest::{fixture, rstest};

fn draft(handle: &str) -> NewUser {
    NewUser::new(
        Username::new(handle).expect("valid username"),
        PersonName::new("Test").expect("valid first name"),
        PersonName::new("User").expect("valid last name"),
        EmailAddress::new(format!("{handle}@example.com")).expect("valid email"),
        PasswordHash::new("hash").expect("valid hash"),
    )
}

fn edge(from: UserId, to: UserId) -> FollowEdge {
    FollowEdge::new(from, to, SelfFollowPolicy::Allow).expect("edge allowed")
}

fn image(post: PostId) -> NewMedia {
    NewMedia::new(
        post,
        MediaType::Image,
        MediaUrl::new("https://cdn.example.com/p.png").expect("valid url"),
    )
}

#[fixture]
fn store() -> InMemorySocialStore {
    InMemorySocialStore::new()
}

async fn add_user(store: &InMemorySocialStore, handle: &str) -> User {
    UserRepository::create(store, &draft(handle))
        .await
        .expect("user created")
}

async fn add_post(store: &InMemorySocialStore, author: UserId) -> Post {
    PostRepository::create(store, &NewPost::new(author))
        .await
        .expect("post created")
}

async fn add_comment(
    store: &InMemorySocialStore,
    author: UserId,
    post: PostId,
    text: &str,
) -> Comment {
    CommentRepository::create(store, &NewComment::new(author, post, text))
        .await
        .expect("comment created")
}

#[rstest]
#[tokio::test]
async fn identifiers_start_at_one_and_increase(store: InMemorySocialStore) {
    let a = add_user(&store, "alice").await;
    let b = add_user(&store, "bob").await;
    assert_eq!(a.id, UserId::new(1));
    assert_eq!(b.id, UserId::new(2));
    assert!(a.is_active);
}

#[rstest]
#[tokio::test]
async fn duplicate_username_is_rejected(store: InMemorySocialStore) {
    add_user(&store, "alice").await;
    let mut clash = draft("alice");
    clash.email = EmailAddress::new("other@example.com").expect("valid email");

    let err = UserRepository::create(&store, &clash)
        .await
        .expect_err("duplicate username");
    assert_eq!(
        err,
        SchemaPersistenceError::unique_violation(UniqueConstraint::Username)
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_email_is_rejected(store: InMemorySocialStore) {
    add_user(&store, "alice").await;
    let mut clash = draft("alicia");
    clash.email = EmailAddress::new("alice@example.com").expect("valid email");

    let err = UserRepository::create(&store, &clash)
        .await
        .expect_err("duplicate email");
    assert_eq!(
        err,
        SchemaPersistenceError::unique_violation(UniqueConstraint::Email)
    );
    assert!(
        UserRepository::find_by_username(&store, &clash.username)
            .await
            .expect("lookup")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn username_clash_wins_over_an_earlier_email_clash(store: InMemorySocialStore) {
    add_user(&store, "alice").await;
    add_user(&store, "bob").await;
    let mut clash = draft("bob");
    clash.email = EmailAddress::new("alice@example.com").expect("valid email");

    let err = UserRepository::create(&store, &clash)
        .await
        .expect_err("both columns taken");
    assert_eq!(
        err,
        SchemaPersistenceError::unique_violation(UniqueConstraint::Username)
    );
}

#[rstest]
fn exhausted_id_sequence_is_an_error() {
    let mut counter = i32::MAX;
    assert_eq!(
        next_id(&mut counter, "post"),
        Err(SchemaPersistenceError::query("post id sequence exhausted"))
    );
    assert_eq!(counter, i32::MAX);
}

#[rstest]
#[tokio::test]
async fn insert_fails_once_the_sequence_is_exhausted(store: InMemorySocialStore) {
    let a = add_user(&store, "alice").await;
    store.state.lock().expect("store lock").next_post = i32::MAX;

    let err = PostRepository::create(&store, &NewPost::new(a.id))
        .await
        .expect_err("no identifiers left");
    assert!(matches!(err, SchemaPersistenceError::Query { .. }));
    assert!(store.list_by_user(a.id).await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn lookups_by_unique_columns(store: InMemorySocialStore) {
    let alice = add_user(&store, "alice").await;

    let by_name = UserRepository::find_by_username(&store, &alice.username)
        .await
        .expect("lookup");
    let by_email = UserRepository::find_by_email(&store, &alice.email)
        .await
        .expect("lookup");
    assert_eq!(by_name, Some(alice.clone()));
    assert_eq!(by_email, Some(alice));
}

#[rstest]
#[tokio::test]
async fn update_rejects_a_taken_username_but_allows_keeping_its_own(
    store: InMemorySocialStore,
) {
    let alice = add_user(&store, "alice").await;
    let bob = add_user(&store, "bob").await;

    let steal = UserChanges {
        username: Some(alice.username.clone()),
        ..UserChanges::default()
    };
    let err = UserRepository::update(&store, bob.id, &steal)
        .await
        .expect_err("username taken");
    assert_eq!(
        err,
        SchemaPersistenceError::unique_violation(UniqueConstraint::Username)
    );

    let keep = UserChanges {
        username: Some(alice.username.clone()),
        is_active: Some(false),
        ..UserChanges::default()
    };
    let updated = UserRepository::update(&store, alice.id, &keep)
        .await
        .expect("update")
        .expect("user exists");
    assert!(!updated.is_active);
}

#[rstest]
#[tokio::test]
async fn update_of_missing_user_returns_none(store: InMemorySocialStore) {
    let changes = UserChanges {
        is_active: Some(false),
        ..UserChanges::default()
    };
    let updated = UserRepository::update(&store, UserId::new(9), &changes)
        .await
        .expect("update");
    assert!(updated.is_none());
}

#[rstest]
#[tokio::test]
async fn duplicate_follow_edge_is_rejected(store: InMemorySocialStore) {
    let a = add_user(&store, "alice").await;
    let b = add_user(&store, "bob").await;

    store.follow(&edge(a.id, b.id)).await.expect("first follow");
    let err = store
        .follow(&edge(a.id, b.id))
        .await
        .expect_err("duplicate follow");
    assert_eq!(
        err,
        SchemaPersistenceError::unique_violation(UniqueConstraint::FollowEdge)
    );

    store
        .follow(&edge(b.id, a.id))
        .await
        .expect("reverse edge is distinct");
}

#[rstest]
#[tokio::test]
async fn follow_requires_both_users(store: InMemorySocialStore) {
    let a = add_user(&store, "alice").await;

    let err = store
        .follow(&edge(a.id, UserId::new(99)))
        .await
        .expect_err("missing followed user");
    assert_eq!(
        err,
        SchemaPersistenceError::foreign_key_violation(ParentEntity::User)
    );
}

#[rstest]
#[tokio::test]
async fn follower_navigation_is_ordered(store: InMemorySocialStore) {
    let a = add_user(&store, "alice").await;
    let b = add_user(&store, "bob").await;
    let c = add_user(&store, "carol").await;

    store.follow(&edge(c.id, a.id)).await.expect("follow");
    store.follow(&edge(b.id, a.id)).await.expect("follow");
    store.follow(&edge(a.id, c.id)).await.expect("follow");

    assert_eq!(
        store.followers_of(a.id).await.expect("followers"),
        vec![b.id, c.id]
    );
    assert_eq!(
        store.following_of(a.id).await.expect("following"),
        vec![c.id]
    );
    assert!(store.unfollow(&edge(b.id, a.id)).await.expect("unfollow"));
    assert!(!store.unfollow(&edge(b.id, a.id)).await.expect("unfollow"));
}

#[rstest]
#[tokio::test]
async fn self_follow_is_storable(store: InMemorySocialStore) {
    let a = add_user(&store, "alice").await;
    store.follow(&edge(a.id, a.id)).await.expect("self follow");
    assert!(store.exists(&edge(a.id, a.id)).await.expect("exists"));
}

#[rstest]
#[tokio::test]
async fn children_require_existing_parents(store: InMemorySocialStore) {
    let a = add_user(&store, "alice").await;

    let post_err = PostRepository::create(&store, &NewPost::new(UserId::new(42)))
        .await
        .expect_err("missing author");
    assert_eq!(
        post_err,
        SchemaPersistenceError::foreign_key_violation(ParentEntity::User)
    );

    let media_err = store
        .attach(&image(PostId::new(42)))
        .await
        .expect_err("missing post");
    assert_eq!(
        media_err,
        SchemaPersistenceError::foreign_key_violation(ParentEntity::Post)
    );

    let comment_err = CommentRepository::create(&store, &NewComment::new(a.id, PostId::new(42), "hi"))
        .await
        .expect_err("missing post");
    assert_eq!(
        comment_err,
        SchemaPersistenceError::foreign_key_violation(ParentEntity::Post)
    );
}

#[rstest]
#[tokio::test]
async fn deleting_a_follower_removes_the_edge_and_keeps_the_other_user(
    store: InMemorySocialStore,
) {
    let a = add_user(&store, "alice").await;
    let b = add_user(&store, "bob").await;
    assert_eq!((a.id.get(), b.id.get()), (1, 2));
    store.follow(&edge(a.id, b.id)).await.expect("follow");

    assert!(UserRepository::delete(&store, a.id).await.expect("delete"));

    assert!(!store.exists(&edge(a.id, b.id)).await.expect("exists"));
    assert!(
        UserRepository::find_by_id(&store, b.id)
            .await
            .expect("lookup")
            .is_some()
    );
    assert!(store.followers_of(b.id).await.expect("followers").is_empty());
}

#[rstest]
#[tokio::test]
async fn deleting_a_user_cascades_across_the_ownership_graph(store: InMemorySocialStore) {
    let a = add_user(&store, "alice").await;
    let b = add_user(&store, "bob").await;
    let a_post = add_post(&store, a.id).await;
    let b_post = add_post(&store, b.id).await;
    let a_media = store.attach(&image(a_post.id)).await.expect("media");
    let b_media = store.attach(&image(b_post.id)).await.expect("media");
    let on_own = add_comment(&store, a.id, a_post.id, "mine").await;
    let on_other = add_comment(&store, a.id, b_post.id, "yours").await;
    let by_b_on_a = add_comment(&store, b.id, a_post.id, "reply").await;
    let kept = add_comment(&store, b.id, b_post.id, "kept").await;
    store.follow(&edge(b.id, a.id)).await.expect("follow");

    assert!(UserRepository::delete(&store, a.id).await.expect("delete"));

    assert!(PostRepository::find_by_id(&store, a_post.id).await.expect("lookup").is_none());
    assert!(MediaRepository::find_by_id(&store, a_media.id).await.expect("lookup").is_none());
    for gone in [on_own.id, on_other.id, by_b_on_a.id] {
        assert!(CommentRepository::find_by_id(&store, gone).await.expect("lookup").is_none());
    }
    assert!(store.list_by_author(a.id).await.expect("list").is_empty());
    assert!(store.following_of(b.id).await.expect("following").is_empty());

    assert_eq!(
        PostRepository::find_by_id(&store, b_post.id).await.expect("lookup"),
        Some(b_post)
    );
    assert_eq!(
        MediaRepository::find_by_id(&store, b_media.id).await.expect("lookup"),
        Some(b_media)
    );
    assert_eq!(
        CommentRepository::list_by_post(&store, b_post.id).await.expect("list"),
        vec![kept]
    );
}

#[rstest]
#[tokio::test]
async fn deleting_a_post_removes_media_and_comments_only(store: InMemorySocialStore) {
    let a = add_user(&store, "alice").await;
    let first = add_post(&store, a.id).await;
    let second = add_post(&store, a.id).await;
    let media = store.attach(&image(first.id)).await.expect("media");
    assert_eq!(media.kind, MediaType::Image);
    add_comment(&store, a.id, first.id, "gone").await;
    let survivor = add_comment(&store, a.id, second.id, "stays").await;

    assert!(PostRepository::delete(&store, first.id).await.expect("delete"));

    assert!(MediaRepository::find_by_id(&store, media.id).await.expect("lookup").is_none());
    assert!(CommentRepository::list_by_post(&store, first.id).await.expect("list").is_empty());
    assert!(UserRepository::find_by_id(&store, a.id).await.expect("lookup").is_some());
    assert_eq!(store.list_by_user(a.id).await.expect("list"), vec![second]);
    assert_eq!(store.list_by_author(a.id).await.expect("list"), vec![survivor]);
}

#[rstest]
#[tokio::test]
async fn deleting_missing_rows_reports_false(store: InMemorySocialStore) {
    assert!(!UserRepository::delete(&store, UserId::new(1)).await.expect("delete"));
    assert!(!PostRepository::delete(&store, PostId::new(1)).await.expect("delete"));
    assert!(!MediaRepository::delete(&store, MediaId::new(1)).await.expect("delete"));
    assert!(!CommentRepository::delete(&store, CommentId::new(1)).await.expect("delete"));
}

#[rstest]
#[tokio::test]
async fn media_and_comments_list_in_id_order(store: InMemorySocialStore) {
    let a = add_user(&store, "alice").await;
    let post = add_post(&store, a.id).await;
    let first = store.attach(&image(post.id)).await.expect("media");
    let second = store
        .attach(&NewMedia::new(
            post.id,
            MediaType::Video,
            MediaUrl::new("https://cdn.example.com/v.mp4").expect("valid url"),
        ))
        .await
        .expect("media");

    let listed = MediaRepository::list_by_post(&store, post.id)
        .await
        .expect("list");
    assert_eq!(listed, vec![first.clone(), second]);

    assert!(MediaRepository::delete(&store, first.id).await.expect("delete"));
    assert_eq!(
        MediaRepository::list_by_post(&store, post.id)
            .await
            .expect("list")
            .len(),
        1
    );
}

#[rstest]
#[tokio::test]
async fn comment_text_can_be_edited(store: InMemorySocialStore) {
    let a = add_user(&store, "alice").await;
    let post = add_post(&store, a.id).await;
    let comment = add_comment(&store, a.id, post.id, "frist").await;

    let edited = store
        .update_text(comment.id, "first")
        .await
        .expect("update")
        .expect("comment exists");
    assert_eq!(edited.comment_text, "first");
    assert!(
        store
            .update_text(CommentId::new(99), "nothing")
            .await
            .expect("update")
            .is_none()
    );
}
