//! User directory and friendships

use super::{abandon, settle, Fetch, WriteOutcome};
use crate::egui_app::api::{ApiClient, ApiError};
use crate::egui_app::load::{LoadAction, LoadState};
use crate::egui_app::notice::Notices;
use crate::egui_app::tasks::{Pending, Poll, Scope};
use crate::shared::models::User;
use std::collections::HashMap;

struct FriendshipWrite {
    befriend: bool,
    pending: Pending<Result<(), ApiError>>,
}

#[derive(Default)]
pub struct UsersScreen {
    scope: Scope,
    users: LoadState<Vec<User>>,
    pending_users: Fetch<Vec<User>>,
    pub filter_text: String,
    writes: HashMap<i64, FriendshipWrite>,
}

impl UsersScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, api: &ApiClient) {
        if matches!(self.users, LoadState::Loaded(_) | LoadState::Loading) {
            return;
        }
        self.users.dispatch(LoadAction::Start);
        let api = api.clone();
        self.pending_users = Some(self.scope.spawn(async move { api.get_users().await }));
    }

    /// Flip the friendship with `user_id`; the flag changes once the server agreed
    pub fn toggle_friend(&mut self, api: &ApiClient, user_id: i64) -> WriteOutcome {
        if !api.is_authenticated() {
            return WriteOutcome::LoginRequired;
        }
        if self.writes.contains_key(&user_id) {
            return WriteOutcome::Busy;
        }
        let Some(user) = self.users.data().and_then(|users| users.iter().find(|u| u.id == user_id)) else {
            return WriteOutcome::Invalid("Unknown user".to_string());
        };

        let befriend = !user.is_friend;
        tracing::info!("{} user {}", if befriend { "Befriending" } else { "Unfriending" }, user_id);
        let client = api.clone();
        let pending = self.scope.spawn(async move {
            if befriend {
                client.add_friend(user_id).await
            } else {
                client.remove_friend(user_id).await
            }
        });
        self.writes.insert(user_id, FriendshipWrite { befriend, pending });
        WriteOutcome::Started
    }

    pub fn poll(&mut self, notices: &mut Notices) {
        settle(&mut self.users, &mut self.pending_users, "users");

        let mut finished = Vec::new();
        self.writes.retain(|user_id, write| match write.pending.poll() {
            Poll::Waiting => true,
            Poll::Ready(result) => {
                finished.push((*user_id, write.befriend, result));
                false
            }
            Poll::Gone => false,
        });

        for (user_id, befriend, result) in finished {
            match result {
                Ok(()) => {
                    let users = self.users.data_mut();
                    if let Some(user) = users.and_then(|users| users.iter_mut().find(|u| u.id == user_id)) {
                        user.is_friend = befriend;
                        notices.info(if befriend {
                            format!("You are now friends with @{}", user.handle)
                        } else {
                            format!("Removed @{} from friends", user.handle)
                        });
                    }
                }
                Err(e) => notices.error(format!("Could not update friendship: {}", e.user_message())),
            }
        }
    }

    pub fn unmount(&mut self) {
        self.scope.invalidate();
        abandon(&mut self.users, &mut self.pending_users);
        self.writes.clear();
    }

    pub fn users(&self) -> &LoadState<Vec<User>> {
        &self.users
    }

    pub fn visible_users(&self) -> Vec<&User> {
        match self.users.data() {
            Some(users) => users.iter().filter(|u| u.matches(&self.filter_text)).collect(),
            None => Vec::new(),
        }
    }

    pub fn is_updating(&self, user_id: i64) -> bool {
        self.writes.contains_key(&user_id)
    }
}
