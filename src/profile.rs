//! Profile and friends editor: command objects over immutable snapshots.
//!
//! DESIGN
//! ======
//! Edits never mutate in place from the caller's perspective: a
//! [`ProfileCommand`] is applied to the current [`ProfileSnapshot`],
//! producing a new one while the previous snapshot goes onto a history
//! stack. `undo` pops that stack. Unknown request/friend ids are silent
//! no-ops; all failure here is local and recoverable.
//!
//! All data is mock/in-memory; there is no account backend.

use serde::Serialize;
use tracing::info;

// =============================================================================
// DATA
// =============================================================================

/// The local user's profile card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub avatar_seed: String,
    pub is_premium: bool,
    pub bio: String,
    pub location_flag: String,
    pub gender: String,
    pub age: u32,
    pub study_duration: String,
    pub friends_count: u32,
    pub interests: Vec<String>,
}

/// A friend's presence on the friends tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FriendStatus {
    Online,
    Offline,
    InRoom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Friend {
    pub id: String,
    pub name: String,
    pub avatar_seed: String,
    pub status: FriendStatus,
    pub last_seen: Option<String>,
}

/// An incoming friend request awaiting accept/decline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendRequest {
    pub id: String,
    pub name: String,
    pub avatar_seed: String,
    pub received: String,
    pub mutual_friends: u32,
}

/// One immutable state of the profile editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSnapshot {
    pub profile: UserProfile,
    pub friends: Vec<Friend>,
    pub requests: Vec<FriendRequest>,
}

// =============================================================================
// COMMANDS
// =============================================================================

/// An edit operation on the profile editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCommand {
    UpdateName(String),
    UpdateBio(String),
    UpdateInterests(Vec<String>),
    /// Move an incoming request onto the friends list.
    AcceptRequest(String),
    /// Drop an incoming request.
    DeclineRequest(String),
    RemoveFriend(String),
}

// =============================================================================
// EDITOR
// =============================================================================

/// Applies commands, keeping the snapshot history for undo.
#[derive(Debug)]
pub struct ProfileEditor {
    current: ProfileSnapshot,
    history: Vec<ProfileSnapshot>,
}

impl ProfileEditor {
    #[must_use]
    pub fn new(initial: ProfileSnapshot) -> Self {
        Self { current: initial, history: Vec::new() }
    }

    #[must_use]
    pub fn current(&self) -> &ProfileSnapshot {
        &self.current
    }

    /// Apply a command, producing a new snapshot. The previous snapshot is
    /// retained for `undo` even when the command was a no-op.
    pub fn apply(&mut self, command: ProfileCommand) -> &ProfileSnapshot {
        let next = apply_command(&self.current, &command);
        info!(?command, "profile: command applied");
        self.history.push(std::mem::replace(&mut self.current, next));
        &self.current
    }

    /// Restore the previous snapshot. Returns `false` when there is no
    /// history left.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }
}

fn apply_command(snapshot: &ProfileSnapshot, command: &ProfileCommand) -> ProfileSnapshot {
    let mut next = snapshot.clone();
    match command {
        ProfileCommand::UpdateName(name) => next.profile.name.clone_from(name),
        ProfileCommand::UpdateBio(bio) => next.profile.bio.clone_from(bio),
        ProfileCommand::UpdateInterests(interests) => next.profile.interests.clone_from(interests),
        ProfileCommand::AcceptRequest(id) => {
            if let Some(pos) = next.requests.iter().position(|r| r.id == *id) {
                let request = next.requests.remove(pos);
                next.friends.push(Friend {
                    id: request.id,
                    name: request.name,
                    avatar_seed: request.avatar_seed,
                    status: FriendStatus::Online,
                    last_seen: None,
                });
                next.profile.friends_count += 1;
            }
        }
        ProfileCommand::DeclineRequest(id) => next.requests.retain(|r| r.id != *id),
        ProfileCommand::RemoveFriend(id) => {
            let before = next.friends.len();
            next.friends.retain(|f| f.id != *id);
            if next.friends.len() < before {
                next.profile.friends_count = next.profile.friends_count.saturating_sub(1);
            }
        }
    }
    next
}

// =============================================================================
// SEED DATA
// =============================================================================

/// The mock local user plus seeded friends and pending requests.
#[must_use]
pub fn seed_profile() -> ProfileSnapshot {
    let friend = |id: &str, name: &str, seed: &str, status, last_seen: Option<&str>| Friend {
        id: id.to_string(),
        name: name.to_string(),
        avatar_seed: seed.to_string(),
        status,
        last_seen: last_seen.map(str::to_string),
    };

    ProfileSnapshot {
        profile: UserProfile {
            id: "u1".to_string(),
            name: "Dolores McClure Sr.".to_string(),
            avatar_seed: "Dolores".to_string(),
            is_premium: true,
            bio: "South korean student currently hanging out in 🇨🇳. WiFi + food + my bed = PERFECTION.".to_string(),
            location_flag: "🇨🇳".to_string(),
            gender: "Female".to_string(),
            age: 23,
            study_duration: "3 Days".to_string(),
            friends_count: 208,
            interests: vec![
                "Renewable energy".to_string(),
                "Biotechnology".to_string(),
                "Education".to_string(),
                "Cryptocurrency".to_string(),
                "Finance".to_string(),
            ],
        },
        friends: vec![
            friend("f1", "Alice Chen", "Alice", FriendStatus::InRoom, None),
            friend("f2", "Bob Smith", "Bob", FriendStatus::Online, None),
            friend("f3", "Charlie Kim", "Charlie", FriendStatus::Offline, Some("2h ago")),
            friend("f4", "Diana Prince", "Diana", FriendStatus::InRoom, None),
            friend("f5", "Evan Wright", "Evan", FriendStatus::Online, None),
        ],
        requests: vec![
            FriendRequest {
                id: "r1".to_string(),
                name: "Jordan Lee".to_string(),
                avatar_seed: "Jordan".to_string(),
                received: "2h ago".to_string(),
                mutual_friends: 3,
            },
            FriendRequest {
                id: "r2".to_string(),
                name: "Casey Neistat".to_string(),
                avatar_seed: "Casey".to_string(),
                received: "1d ago".to_string(),
                mutual_friends: 1,
            },
        ],
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
