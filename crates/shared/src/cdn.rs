//! Discord CDN URL derivation for avatars and banners.

use crate::constants::{
    ANIMATED_HASH_PREFIX, AVATAR_SIZE, BANNER_SIZE, CDN_BASE_URL, DEFAULT_AVATAR_COUNT,
};

/// File extension for an asset hash: animated hashes (`a_` prefix) are GIFs.
pub fn image_extension(hash: &str) -> &'static str {
    if hash.starts_with(ANIMATED_HASH_PREFIX) {
        "gif"
    } else {
        "png"
    }
}

/// URL of a user's uploaded avatar.
pub fn avatar_url(user_id: &str, avatar_hash: &str) -> String {
    format!(
        "{CDN_BASE_URL}/avatars/{user_id}/{avatar_hash}.{}?size={AVATAR_SIZE}",
        image_extension(avatar_hash)
    )
}

/// URL of a user's profile banner.
pub fn banner_url(user_id: &str, banner_hash: &str) -> String {
    format!(
        "{CDN_BASE_URL}/banners/{user_id}/{banner_hash}.{}?size={BANNER_SIZE}",
        image_extension(banner_hash)
    )
}

/// URL of the legacy default avatar picked by discriminator.
///
/// A missing discriminator counts as `"0"`.
pub fn default_avatar_url(discriminator: Option<&str>) -> String {
    let index = default_avatar_index(discriminator.unwrap_or("0"));
    format!("{CDN_BASE_URL}/embed/avatars/{index}.png")
}

/// `parseInt(discriminator) % 5`, computed without overflow.
///
/// Leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit. Input with no leading digits yields 0. The sign is kept on the
/// remainder, so `"-7"` gives `-2`.
pub fn default_avatar_index(discriminator: &str) -> i64 {
    let trimmed = discriminator.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first().copied() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let remainder = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, d| (acc * 10 + u64::from(d - b'0')) % DEFAULT_AVATAR_COUNT);

    let remainder = remainder as i64;
    if negative {
        -remainder
    } else {
        remainder
    }
}
