use std::sync::Arc;

use tracing::debug;

use crate::member::{Member, MemberRepository};

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub login_id: String,
    pub password: String,
}

pub trait AuthProvider: Send + Sync {
    /// `Some(member)` only for a known login id with a matching password.
    /// Unknown id and wrong password are the same `None`.
    fn authenticate(&self, login_id: &str, password: &str) -> Option<Member>;

    fn login(&self, req: &LoginRequest) -> Option<Member> {
        self.authenticate(&req.login_id, &req.password)
    }
}

/// Verifies plaintext credentials against a member repository.
pub struct LocalAuthProvider {
    members: Arc<dyn MemberRepository>,
}

impl LocalAuthProvider {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self { Self { members } }
}

impl AuthProvider for LocalAuthProvider {
    fn authenticate(&self, login_id: &str, password: &str) -> Option<Member> {
        let found = self
            .members
            .find_by_login_id(login_id)
            .filter(|m| m.password == password);
        debug!(login_id, ok = found.is_some(), "auth.authenticate");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::MemoryMemberRepository;

    fn provider() -> (LocalAuthProvider, Member) {
        let repo = Arc::new(MemoryMemberRepository::new());
        let alice = repo.save(Member::new("alice", "Alice", "secret1")).unwrap();
        (LocalAuthProvider::new(repo), alice)
    }

    #[test]
    fn matching_password_returns_member() {
        let (auth, alice) = provider();
        assert_eq!(auth.authenticate("alice", "secret1"), Some(alice));
    }

    #[test]
    fn wrong_password_and_unknown_id_look_the_same() {
        let (auth, _) = provider();
        let wrong = auth.authenticate("alice", "wrong");
        let unknown = auth.authenticate("bob", "anything");
        assert_eq!(wrong, None);
        assert_eq!(unknown, None);
        assert_eq!(wrong, unknown);
    }

    #[test]
    fn comparison_is_exact_and_case_sensitive() {
        let (auth, _) = provider();
        assert!(auth.authenticate("alice", "Secret1").is_none());
        assert!(auth.authenticate("alice", "secret1 ").is_none());
        assert!(auth.authenticate("alice", "").is_none());
        assert!(auth.authenticate("ALICE", "secret1").is_none());
    }

    #[test]
    fn login_request_delegates_to_authenticate() {
        let (auth, alice) = provider();
        let req = LoginRequest { login_id: "alice".into(), password: "secret1".into() };
        assert_eq!(auth.login(&req), Some(alice));
        let bad = LoginRequest { login_id: "alice".into(), password: "nope".into() };
        assert_eq!(auth.login(&bad), None);
    }
}
