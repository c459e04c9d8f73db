pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Enter your email address.".into());
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.".into());
    }
    if password.is_empty() {
        return Err("Enter your password.".into());
    }
    Ok(())
}

/// Notice shown above the form when the previous session was ended for us.
pub fn sign_out_notice(query: &str) -> Option<&'static str> {
    let reason = query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "reason")
        .map(|(_, value)| value)?;
    match reason {
        "idle" => Some("You were signed out after a period of inactivity."),
        "expired" => Some("Your session has ended. Please sign in again."),
        _ => None,
    }
}
