//! Level passwords.
//!
//! A password is the last six characters of a 32-bit string hash of the
//! level's compact JSON grid. Players type them in to jump to a stage, so the
//! derivation must stay stable for a given pack file.

use tui_mordicus_types::PASSWORD_LEN;

const HASH_SEED: i32 = 123_456;

/// Hash `text` into a password.
///
/// Each character contributes its first UTF-16 code unit, so an emoji counts
/// as its high surrogate only.
///
/// ```
/// use tui_mordicus_levels::password::password_hash;
///
/// assert_eq!(password_hash(""), "123456");
/// assert_eq!(password_hash("a"), "827233");
/// ```
pub fn password_hash(text: &str) -> String {
    let mut buf = [0u16; 2];
    let hash = text.chars().fold(HASH_SEED, |hash, ch| {
        let unit = ch.encode_utf16(&mut buf)[0];
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    });
    last_chars(&hash.to_string(), PASSWORD_LEN)
}

/// Next candidate after a collision: the password read as a number, plus one.
pub fn bump_password(password: &str) -> String {
    let value: i64 = password.parse().unwrap_or(0);
    last_chars(&(value + 1).to_string(), PASSWORD_LEN)
}

fn last_chars(s: &str, n: usize) -> String {
    let skip = s.chars().count().saturating_sub(n);
    s.chars().skip(skip).collect()
}
