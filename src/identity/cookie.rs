//! Session id <-> cookie mapping at the transport boundary.
//!
//! Pure string functions so the session store stays transport agnostic. The
//! cookie only ever carries the opaque session id.

pub const DEFAULT_SESSION_COOKIE: &str = "mySessionId";

const COOKIE_ATTRS: &str = "HttpOnly; SameSite=Lax; Path=/";

/// `Set-Cookie` value delivering `session_id` under `name`.
pub fn session_cookie(name: &str, session_id: &str) -> String {
    format!("{}={}; {}", name, session_id, COOKIE_ATTRS)
}

/// `Set-Cookie` value instructing the client to drop the session cookie.
pub fn expired_session_cookie(name: &str) -> String {
    format!("{}=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; {}", name, COOKIE_ATTRS)
}

/// Value of cookie `name` in a raw `Cookie` request header. Empty values count as absent.
pub fn cookie_value(raw: &str, name: &str) -> Option<String> {
    for part in raw.split(';') {
        let p = part.trim();
        if let Some((k, v)) = p.split_once('=') {
            if k.trim() == name {
                let v = v.trim().trim_matches('"');
                if v.is_empty() { return None; }
                return Some(v.to_string());
            }
        }
    }
    None
}

/// RFC 6265 cookie-name (an RFC 2616 token).
pub fn is_valid_cookie_name(name: &str) -> bool {
    const SEPARATORS: &[u8] = b"()<>@,;:\\\"/[]?={} \t";
    !name.is_empty()
        && name.bytes().all(|b| b.is_ascii_graphic() && !SEPARATORS.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_cookie_carries_only_the_id() {
        let c = session_cookie("mySessionId", "abc_DEF-123");
        assert!(c.starts_with("mySessionId=abc_DEF-123; "));
        assert!(c.contains("HttpOnly"));
        assert!(c.contains("SameSite=Lax"));
        assert!(c.contains("Path=/"));
        assert_eq!(c.matches('=').count(), 3);
    }

    #[test]
    fn expired_cookie_clears_value() {
        let c = expired_session_cookie("mySessionId");
        assert!(c.starts_with("mySessionId=;"));
        assert!(c.contains("Max-Age=0"));
    }

    #[test]
    fn parses_named_cookie_among_others() {
        let raw = "theme=dark; mySessionId=tok123 ; other=x";
        assert_eq!(cookie_value(raw, "mySessionId"), Some("tok123".to_string()));
        assert_eq!(cookie_value(raw, "theme"), Some("dark".to_string()));
        assert_eq!(cookie_value(raw, "missing"), None);
    }

    #[test]
    fn prefix_names_do_not_match() {
        assert_eq!(cookie_value("mySessionIdX=1", "mySessionId"), None);
        assert_eq!(cookie_value("xmySessionId=1", "mySessionId"), None);
    }

    #[test]
    fn empty_or_malformed_values_are_absent() {
        assert_eq!(cookie_value("mySessionId=", "mySessionId"), None);
        assert_eq!(cookie_value("mySessionId", "mySessionId"), None);
        assert_eq!(cookie_value("", "mySessionId"), None);
    }

    #[test]
    fn value_with_equals_is_kept_whole() {
        assert_eq!(cookie_value("sid=a=b", "sid"), Some("a=b".to_string()));
    }

    #[test]
    fn cookie_name_validation() {
        assert!(is_valid_cookie_name("mySessionId"));
        assert!(is_valid_cookie_name("__Host-sid"));
        assert!(!is_valid_cookie_name(""));
        assert!(!is_valid_cookie_name("my session"));
        assert!(!is_valid_cookie_name("sid=1"));
        assert!(!is_valid_cookie_name("sid;"));
    }
}
