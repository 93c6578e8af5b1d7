/// Base URL of the Discord REST API (v10).
pub const DIRECTORY_API_BASE_URL: &str = "https://discord.com/api/v10";
/// Base URL of the Discord media CDN.
pub const CDN_BASE_URL: &str = "https://cdn.discordapp.com";
/// Requested edge length for avatar images.
pub const AVATAR_SIZE: u32 = 256;
/// Requested width for banner images.
pub const BANNER_SIZE: u32 = 600;
/// Number of legacy default avatars; the index is `discriminator % DEFAULT_AVATAR_COUNT`.
pub const DEFAULT_AVATAR_COUNT: u64 = 5;
/// Hash prefix Discord uses for animated assets.
pub const ANIMATED_HASH_PREFIX: &str = "a_";
