/// Display name given to a user created on first login: `User` plus the last
/// four characters of the phone number.
#[must_use]
pub fn default_display_name(phone: &str) -> String {
    let tail: String = phone
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("User {tail}")
}
