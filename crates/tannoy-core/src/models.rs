//! Notification, embed, and field value objects.
//!
//! All types are immutable once constructed and serialize to the JSON shape
//! the Discord execute-webhook endpoint expects. Optional attributes that
//! are unset stay off the wire entirely.

use serde::{Deserialize, Serialize};

use crate::limits::EMPTY_FIELD_PLACEHOLDER;

/// A name/value pair rendered inside an embed.
///
/// Construction normalizes the value: Discord rejects empty field values,
/// so an empty or whitespace-only value is replaced with `"-"`.
///
/// # Example
///
/// ```
/// use tannoy_core::EmbedField;
///
/// let field = EmbedField::new("Branch", "main").inline(true);
/// assert_eq!(field.value, "main");
///
/// let blank = EmbedField::new("Commit", "   ");
/// assert_eq!(blank.value, "-");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    /// Field label shown in bold.
    pub name: String,
    /// Field content. Never empty after construction.
    pub value: String,
    /// Whether the field renders on the same row as its neighbors.
    #[serde(default)]
    pub inline: bool,
}

impl EmbedField {
    /// Creates a field, substituting the placeholder for empty values.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let value = if value.trim().is_empty() {
            EMPTY_FIELD_PLACEHOLDER.to_string()
        } else {
            value
        };

        Self { name: name.into(), value, inline: false }
    }

    /// Sets whether the field renders inline.
    #[must_use]
    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }
}

/// A richly formatted sub-block of a notification.
///
/// Construction performs no limit enforcement; field counts and lengths are
/// checked by the delivery client at send time, so the model can be shared
/// across client configurations with different effective limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    /// Embed title line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body text, rendered as markdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Accent color as a 24-bit RGB integer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// Ordered field list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    /// Creates an empty embed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the embed title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the embed description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the accent color.
    #[must_use]
    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Appends a field, preserving insertion order.
    #[must_use]
    pub fn field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }
}

/// Top-level webhook payload.
///
/// A meaningful notification carries at least one of `content` or `embeds`;
/// that rule is enforced by the delivery client, not here.
///
/// # Example
///
/// ```
/// use tannoy_core::{Embed, EmbedField, Notification};
///
/// let notification = Notification::new()
///     .content("deploy finished")
///     .embed(
///         Embed::new()
///             .color(0x57F287)
///             .field(EmbedField::new("Environment", "production")),
///     );
/// assert!(!notification.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Plain message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Per-message username override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Per-message avatar override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Ordered embed list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

impl Notification {
    /// Creates an empty notification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message text.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Overrides the webhook's configured username for this message.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Overrides the webhook's configured avatar for this message.
    #[must_use]
    pub fn avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Appends an embed, preserving insertion order.
    #[must_use]
    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    /// Returns true when the notification carries no content and no embeds.
    pub fn is_empty(&self) -> bool {
        self.content.as_deref().is_none_or(str::is_empty) && self.embeds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_normalized_when_empty() {
        assert_eq!(EmbedField::new("id", "").value, "-");
        assert_eq!(EmbedField::new("id", " \t\n").value, "-");
        assert_eq!(EmbedField::new("id", "42").value, "42");
    }

    #[test]
    fn field_inline_defaults_to_false() {
        let field = EmbedField::new("a", "b");
        assert!(!field.inline);
        assert!(field.inline(true).inline);
    }

    #[test]
    fn notification_emptiness() {
        assert!(Notification::new().is_empty());
        assert!(Notification::new().content("").is_empty());
        assert!(!Notification::new().content("hi").is_empty());
        assert!(!Notification::new().embed(Embed::new()).is_empty());
    }
}
