//! Member records and the lookup used by the credential verifier.
//!
//! The login core only depends on [`MemberRepository::find_by_login_id`]; the
//! in-memory repository also carries the registration side (`save`, listing)
//! used by the HTTP surface.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: u64,
    pub login_id: String,
    pub name: String,
    pub password: String,
}

impl Member {
    pub fn new(login_id: impl Into<String>, name: impl Into<String>, password: impl Into<String>) -> Self {
        Self { id: 0, login_id: login_id.into(), name: name.into(), password: password.into() }
    }
}

/// Public projection of a member; the stored password never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberView {
    pub id: u64,
    pub login_id: String,
    pub name: String,
}

impl From<&Member> for MemberView {
    fn from(m: &Member) -> Self {
        Self { id: m.id, login_id: m.login_id.clone(), name: m.name.clone() }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemberError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("login id already in use: {0}")]
    DuplicateLoginId(String),
}

pub trait MemberRepository: Send + Sync {
    fn find_by_login_id(&self, login_id: &str) -> Option<Member>;
}

#[derive(Debug, Default)]
pub struct MemoryMemberRepository {
    members: RwLock<HashMap<u64, Member>>,
    sequence: AtomicU64,
}

impl MemoryMemberRepository {
    pub fn new() -> Self { Self::default() }

    /// Store a new member under the next id. The login id must be unique.
    pub fn save(&self, mut member: Member) -> Result<Member, MemberError> {
        if member.login_id.is_empty() { return Err(MemberError::EmptyField("login_id")); }
        if member.name.is_empty() { return Err(MemberError::EmptyField("name")); }
        if member.password.is_empty() { return Err(MemberError::EmptyField("password")); }

        // Uniqueness check and insert under one write guard
        let mut map = self.members.write();
        if map.values().any(|m| m.login_id == member.login_id) {
            return Err(MemberError::DuplicateLoginId(member.login_id));
        }
        member.id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        map.insert(member.id, member.clone());
        tracing::debug!(id = member.id, login_id = %member.login_id, "member.save");
        Ok(member)
    }

    pub fn find_by_id(&self, id: u64) -> Option<Member> {
        self.members.read().get(&id).cloned()
    }

    pub fn find_all(&self) -> Vec<Member> {
        let mut all: Vec<Member> = self.members.read().values().cloned().collect();
        all.sort_by_key(|m| m.id);
        all
    }

    pub fn clear_store(&self) {
        self.members.write().clear();
    }
}

impl MemberRepository for MemoryMemberRepository {
    fn find_by_login_id(&self, login_id: &str) -> Option<Member> {
        self.members.read().values().find(|m| m.login_id == login_id).cloned()
    }
}

#[cfg(test)]
#[path = "member_tests.rs"]
mod member_tests;
