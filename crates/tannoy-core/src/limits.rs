//! Discord webhook payload limits.
//!
//! Values mirror the limits Discord publishes for the execute-webhook
//! endpoint and embed objects. They are validated at send time by the
//! delivery layer, not at construction time.

/// Maximum number of embeds per webhook message.
pub const MAX_EMBEDS: usize = 10;

/// Maximum number of fields in a single embed.
pub const MAX_FIELDS_PER_EMBED: usize = 25;

/// Maximum length of an embed field name, in characters.
pub const MAX_FIELD_NAME_LEN: usize = 256;

/// Maximum length of an embed field value, in characters.
pub const MAX_FIELD_VALUE_LEN: usize = 1024;

/// Maximum length of the top-level `content` string, in characters.
pub const MAX_CONTENT_LEN: usize = 2000;

/// Maximum length of an embed title, in characters.
pub const MAX_TITLE_LEN: usize = 256;

/// Maximum length of an embed description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 4096;

/// Maximum length of a username override, in characters.
pub const MAX_USERNAME_LEN: usize = 80;

/// Maximum combined length of title, description, and all field names and
/// values across a single embed, in characters.
pub const MAX_EMBED_TOTAL_LEN: usize = 6000;

/// Largest valid embed color (24-bit RGB).
pub const MAX_COLOR: u32 = 0xFF_FF_FF;

/// Placeholder substituted for empty field values, which Discord rejects.
pub const EMPTY_FIELD_PLACEHOLDER: &str = "-";
