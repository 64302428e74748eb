use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use base64::Engine;
use parking_lot::RwLock;
use rand::RngCore;
use tracing::debug;

pub type SessionId = String;

/// Raw entropy per session id, before base64url encoding.
const SESSION_ID_BYTES: usize = 32;

#[derive(Debug)]
struct SessionEntry<V> {
    value: V,
    issued_at: Instant,
}

fn gen_id() -> SessionId {
    // 256-bit random token base64url without padding
    let mut buf = [0u8; SESSION_ID_BYTES];
    rand::thread_rng().fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

/// Short prefix of a session id for log lines.
pub(crate) fn fingerprint(session_id: &str) -> String {
    session_id.chars().take(8).collect()
}

/// Server-side session store: opaque session id -> attached value.
///
/// A session is either present or absent. Expiry (explicit, or by the optional
/// TTL) removes the entry, so an expired id reads exactly like one that was
/// never issued. Every operation takes the lock once, so inserts, lookups and
/// removals are atomic per id.
#[derive(Debug)]
pub struct SessionManager<V> {
    sessions: RwLock<HashMap<SessionId, SessionEntry<V>>>,
    ttl: Option<Duration>,
}

impl<V> Default for SessionManager<V> {
    fn default() -> Self { Self { sessions: RwLock::new(HashMap::new()), ttl: None } }
}

impl<V: Clone> SessionManager<V> {
    pub fn new() -> Self { Self::default() }

    /// Sessions older than `ttl` are treated as absent and evicted.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { sessions: RwLock::new(HashMap::new()), ttl: Some(ttl) }
    }

    pub fn ttl(&self) -> Option<Duration> { self.ttl }

    /// Attach `value` to a freshly drawn session id and return the id.
    pub fn create_session(&self, value: V) -> SessionId {
        let now = Instant::now();
        let mut map = self.sessions.write();
        loop {
            let sid = gen_id();
            if let Entry::Vacant(slot) = map.entry(sid.clone()) {
                slot.insert(SessionEntry { value, issued_at: now });
                let active = map.len();
                drop(map);
                debug!(sid = %fingerprint(&sid), active, "session.create");
                return sid;
            }
        }
    }

    /// Resolve a session id (as presented by the client, if at all) to its value.
    pub fn get_session(&self, session_id: Option<&str>) -> Option<V> {
        let sid = session_id?;
        let now = Instant::now();
        {
            let map = self.sessions.read();
            let ent = map.get(sid)?;
            if !self.is_expired(ent, now) {
                return Some(ent.value.clone());
            }
        }
        // Past its TTL: remove so the id stays indistinguishable from unknown
        let mut map = self.sessions.write();
        if map.get(sid).is_some_and(|ent| self.is_expired(ent, now)) {
            map.remove(sid);
            debug!(sid = %fingerprint(sid), "session.evict");
        }
        None
    }

    /// Invalidate a session. Unknown or missing ids are a no-op.
    /// Returns whether an entry was removed.
    pub fn expire(&self, session_id: Option<&str>) -> bool {
        let Some(sid) = session_id else { return false; };
        let removed = self.sessions.write().remove(sid).is_some();
        if removed {
            debug!(sid = %fingerprint(sid), "session.expire");
        }
        removed
    }

    /// Drop every session past the TTL. Without a TTL nothing expires by age.
    pub fn sweep_expired(&self) -> usize {
        if self.ttl.is_none() { return 0; }
        let now = Instant::now();
        let mut map = self.sessions.write();
        let before = map.len();
        map.retain(|_, ent| !self.is_expired(ent, now));
        before - map.len()
    }

    pub fn len(&self) -> usize { self.sessions.read().len() }

    pub fn is_empty(&self) -> bool { self.sessions.read().is_empty() }

    fn is_expired(&self, ent: &SessionEntry<V>, now: Instant) -> bool {
        self.ttl.is_some_and(|ttl| now.saturating_duration_since(ent.issued_at) >= ttl)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
