use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use super::{
    identity::{Identity, Role},
    session::SessionSnapshot,
};

pub const SIGN_IN_PATH: &str = "/login";
pub const REDIRECT_PARAM: &str = "redirect_to";

const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Snapshot not resolved yet; render a neutral pending state.
    Pending,
    Allow,
    Redirect(String),
}

impl GuardDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, GuardDecision::Pending)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardDecision::Redirect(target) => Some(target),
            _ => None,
        }
    }
}

fn path_only(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// Role a path's subtree is reserved for, if any.
pub fn required_role(path: &str) -> Option<Role> {
    let first = path_only(path).split('/').find(|segment| !segment.is_empty())?;
    Role::ALL
        .into_iter()
        .find(|role| role.scope_prefix().trim_start_matches('/') == first)
}

pub fn sign_in_redirect(requested_path: &str) -> String {
    format!(
        "{}?{}={}",
        SIGN_IN_PATH,
        REDIRECT_PARAM,
        utf8_percent_encode(requested_path, QUERY_VALUE)
    )
}

pub fn evaluate(snapshot: &SessionSnapshot, required: Role, requested_path: &str) -> GuardDecision {
    if snapshot.loading {
        return GuardDecision::Pending;
    }
    match &snapshot.identity {
        None => GuardDecision::Redirect(sign_in_redirect(requested_path)),
        Some(identity) if identity.role != required => {
            log::debug!(
                "role {} may not open {}, sending to landing view",
                identity.role,
                requested_path
            );
            GuardDecision::Redirect(identity.role.landing_path().to_string())
        }
        Some(_) => GuardDecision::Allow,
    }
}

/// Like [`evaluate`], with the required role derived from the path. Paths
/// outside every role-scoped subtree are always allowed.
pub fn evaluate_path(snapshot: &SessionSnapshot, path: &str) -> GuardDecision {
    match required_role(path) {
        Some(role) => evaluate(snapshot, role, path),
        None => GuardDecision::Allow,
    }
}

/// Extracts and decodes the return path from a sign-in query string.
pub fn redirect_param(query: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == REDIRECT_PARAM)
        .and_then(|(_, value)| percent_decode_str(value).decode_utf8().ok())
        .map(|value| value.into_owned())
}

/// Browsers drop tabs and newlines while parsing a URL, so `/\t/host` would
/// become protocol relative. Any whitespace or control character disqualifies.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.chars().any(|c| c.is_control() || c.is_whitespace())
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.contains("://")
}

/// Where to send an identity after sign-in. The requested return path is
/// honoured only if it is local and reachable by the identity's role.
pub fn post_login_destination(identity: &Identity, redirect_to: Option<&str>) -> String {
    let landing = identity.role.landing_path().to_string();
    let Some(target) = redirect_to.map(str::trim).filter(|t| !t.is_empty()) else {
        return landing;
    };
    if !is_local_path(target) || path_only(target) == SIGN_IN_PATH {
        return landing;
    }
    match required_role(target) {
        Some(role) if role != identity.role => landing,
        _ => target.to_string(),
    }
}
