//! In-memory implementation of every social schema port.
//!
//! Mirrors the PostgreSQL constraints without a database: unique usernames
//! and emails, unique follower edges, foreign keys checked on insert, and
//! the `ON DELETE CASCADE` chains replayed explicitly on delete. One mutex
//! guards the whole store so a cascade is observed atomically.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CommentRepository, FollowerRepository, MediaRepository, ParentEntity, PostRepository,
    SchemaPersistenceError, UniqueConstraint, UserRepository,
};
use crate::domain::{
    Comment, CommentId, EmailAddress, FollowEdge, Media, MediaId, NewComment, NewMedia, NewPost,
    NewUser, Post, PostId, User, UserChanges, UserId, Username,
};

#[derive(Debug, Default)]
struct StoreState {
    next_user: i32,
    next_post: i32,
    next_media: i32,
    next_comment: i32,
    users: BTreeMap<UserId, User>,
    followers: BTreeSet<(UserId, UserId)>,
    posts: BTreeMap<PostId, Post>,
    media: BTreeMap<MediaId, Media>,
    comments: BTreeMap<CommentId, Comment>,
}

/// Advance a table's identifier sequence, failing once `i32` is exhausted.
fn next_id(counter: &mut i32, table: &str) -> Result<i32, SchemaPersistenceError> {
    let id = counter
        .checked_add(1)
        .ok_or_else(|| SchemaPersistenceError::query(format!("{table} id sequence exhausted")))?;
    *counter = id;
    Ok(id)
}

impl StoreState {
    fn require_user(&self, id: UserId) -> Result<(), SchemaPersistenceError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(SchemaPersistenceError::foreign_key_violation(
                ParentEntity::User,
            ))
        }
    }

    fn require_post(&self, id: PostId) -> Result<(), SchemaPersistenceError> {
        if self.posts.contains_key(&id) {
            Ok(())
        } else {
            Err(SchemaPersistenceError::foreign_key_violation(
                ParentEntity::Post,
            ))
        }
    }

    /// Reject `username`/`email` values held by any user other than `owner`.
    ///
    /// Usernames are checked across every user before any email, so a
    /// draft colliding on both reports `Username`.
    fn check_unique(
        &self,
        owner: Option<UserId>,
        username: Option<&Username>,
        email: Option<&EmailAddress>,
    ) -> Result<(), SchemaPersistenceError> {
        let others = || self.users.values().filter(move |user| Some(user.id) != owner);
        if username.is_some_and(|name| others().any(|user| user.username == *name)) {
            return Err(SchemaPersistenceError::unique_violation(
                UniqueConstraint::Username,
            ));
        }
        if email.is_some_and(|address| others().any(|user| user.email == *address)) {
            return Err(SchemaPersistenceError::unique_violation(
                UniqueConstraint::Email,
            ));
        }
        Ok(())
    }

    fn remove_post(&mut self, id: PostId) -> bool {
        if self.posts.remove(&id).is_none() {
            return false;
        }
        self.media.retain(|_, media| media.post_id != id);
        self.comments.retain(|_, comment| comment.post_id != id);
        true
    }

    fn remove_user(&mut self, id: UserId) -> bool {
        if self.users.remove(&id).is_none() {
            return false;
        }
        let owned: Vec<PostId> = self
            .posts
            .values()
            .filter(|post| post.user_id == id)
            .map(|post| post.id)
            .collect();
        for post in owned {
            self.remove_post(post);
        }
        self.comments.retain(|_, comment| comment.author_id != id);
        self.followers
            .retain(|(from, to)| *from != id && *to != id);
        true
    }
}

/// Social schema store held entirely in process memory.
///
/// Identifiers start at 1 per table and are never reused, matching `SERIAL`
/// columns. Listings come back in ascending identifier order.
#[derive(Debug, Default)]
pub struct InMemorySocialStore {
    state: Mutex<StoreState>,
}

impl InMemorySocialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, StoreState>, SchemaPersistenceError> {
        self.state
            .lock()
            .map_err(|_| SchemaPersistenceError::connection("in-memory store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemorySocialStore {
    async fn create(&self, new_user: &NewUser) -> Result<User, SchemaPersistenceError> {
        let mut state = self.state()?;
        state.check_unique(None, Some(&new_user.username), Some(&new_user.email))?;
        let id = UserId::new(next_id(&mut state.next_user, "user")?);
        let user = User::from_new(id, new_user.clone());
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, SchemaPersistenceError> {
        Ok(self.state()?.users.get(&id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, SchemaPersistenceError> {
        let state = self.state()?;
        Ok(state
            .users
            .values()
            .find(|user| user.username == *username)
            .cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, SchemaPersistenceError> {
        let state = self.state()?;
        Ok(state.users.values().find(|user| user.email == *email).cloned())
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, SchemaPersistenceError> {
        let mut state = self.state()?;
        if !state.users.contains_key(&id) {
            return Ok(None);
        }
        state.check_unique(Some(id), changes.username.as_ref(), changes.email.as_ref())?;
        Ok(state.users.get_mut(&id).map(|user| {
            user.apply(changes);
            user.clone()
        }))
    }

    async fn delete(&self, id: UserId) -> Result<bool, SchemaPersistenceError> {
        let removed = self.state()?.remove_user(id);
        if removed {
            debug!(user = %id, "user removed with dependent rows");
        }
        Ok(removed)
    }
}

#[async_trait]
impl FollowerRepository for InMemorySocialStore {
    async fn follow(&self, edge: &FollowEdge) -> Result<(), SchemaPersistenceError> {
        let mut state = self.state()?;
        state.require_user(edge.follower())?;
        state.require_user(edge.followed())?;
        if state.followers.insert((edge.follower(), edge.followed())) {
            Ok(())
        } else {
            Err(SchemaPersistenceError::unique_violation(
                UniqueConstraint::FollowEdge,
            ))
        }
    }

    async fn unfollow(&self, edge: &FollowEdge) -> Result<bool, SchemaPersistenceError> {
        Ok(self
            .state()?
            .followers
            .remove(&(edge.follower(), edge.followed())))
    }

    async fn exists(&self, edge: &FollowEdge) -> Result<bool, SchemaPersistenceError> {
        Ok(self
            .state()?
            .followers
            .contains(&(edge.follower(), edge.followed())))
    }

    async fn followers_of(&self, user: UserId) -> Result<Vec<UserId>, SchemaPersistenceError> {
        let state = self.state()?;
        Ok(state
            .followers
            .iter()
            .filter(|(_, to)| *to == user)
            .map(|(from, _)| *from)
            .collect())
    }

    async fn following_of(&self, user: UserId) -> Result<Vec<UserId>, SchemaPersistenceError> {
        let state = self.state()?;
        Ok(state
            .followers
            .iter()
            .filter(|(from, _)| *from == user)
            .map(|(_, to)| *to)
            .collect())
    }
}

#[async_trait]
impl PostRepository for InMemorySocialStore {
    async fn create(&self, new_post: &NewPost) -> Result<Post, SchemaPersistenceError> {
        let mut state = self.state()?;
        state.require_user(new_post.user_id)?;
        let id = PostId::new(next_id(&mut state.next_post, "post")?);
        let post = Post::from_new(id, *new_post);
        state.posts.insert(id, post);
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, SchemaPersistenceError> {
        Ok(self.state()?.posts.get(&id).copied())
    }

    async fn list_by_user(&self, user: UserId) -> Result<Vec<Post>, SchemaPersistenceError> {
        let state = self.state()?;
        Ok(state
            .posts
            .values()
            .filter(|post| post.user_id == user)
            .copied()
            .collect())
    }

    async fn delete(&self, id: PostId) -> Result<bool, SchemaPersistenceError> {
        Ok(self.state()?.remove_post(id))
    }
}

#[async_trait]
impl MediaRepository for InMemorySocialStore {
    async fn attach(&self, new_media: &NewMedia) -> Result<Media, SchemaPersistenceError> {
        let mut state = self.state()?;
        state.require_post(new_media.post_id)?;
        let id = MediaId::new(next_id(&mut state.next_media, "media")?);
        let media = Media::from_new(id, new_media.clone());
        state.media.insert(id, media.clone());
        Ok(media)
    }

    async fn find_by_id(&self, id: MediaId) -> Result<Option<Media>, SchemaPersistenceError> {
        Ok(self.state()?.media.get(&id).cloned())
    }

    async fn list_by_post(&self, post: PostId) -> Result<Vec<Media>, SchemaPersistenceError> {
        let state = self.state()?;
        Ok(state
            .media
            .values()
            .filter(|media| media.post_id == post)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: MediaId) -> Result<bool, SchemaPersistenceError> {
        Ok(self.state()?.media.remove(&id).is_some())
    }
}

#[async_trait]
impl CommentRepository for InMemorySocialStore {
    async fn create(&self, new_comment: &NewComment) -> Result<Comment, SchemaPersistenceError> {
        let mut state = self.state()?;
        state.require_user(new_comment.author_id)?;
        state.require_post(new_comment.post_id)?;
        let id = CommentId::new(next_id(&mut state.next_comment, "comment")?);
        let comment = Comment::from_new(id, new_comment.clone());
        state.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn find_by_id(
        &self,
        id: CommentId,
    ) -> Result<Option<Comment>, SchemaPersistenceError> {
        Ok(self.state()?.comments.get(&id).cloned())
    }

    async fn list_by_post(&self, post: PostId) -> Result<Vec<Comment>, SchemaPersistenceError> {
        let state = self.state()?;
        Ok(state
            .comments
            .values()
            .filter(|comment| comment.post_id == post)
            .cloned()
            .collect())
    }

    async fn list_by_author(
        &self,
        author: UserId,
    ) -> Result<Vec<Comment>, SchemaPersistenceError> {
        let state = self.state()?;
        Ok(state
            .comments
            .values()
            .filter(|comment| comment.author_id == author)
            .cloned()
            .collect())
    }

    async fn update_text(
        &self,
        id: CommentId,
        comment_text: &str,
    ) -> Result<Option<Comment>, SchemaPersistenceError> {
        let mut state = self.state()?;
        Ok(state.comments.get_mut(&id).map(|comment| {
            comment_text.clone_into(&mut comment.comment_text);
            comment.clone()
        }))
    }

    async fn delete(&self, id: CommentId) -> Result<bool, SchemaPersistenceError> {
        Ok(self.state()?.comments.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests;
