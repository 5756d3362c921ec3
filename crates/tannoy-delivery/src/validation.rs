//! Send-time payload validation against Discord's published limits.
//!
//! Validation runs before any network I/O so an over-limit payload never
//! results in a partial send. Checks run in a fixed order (message-level
//! first, then per embed, then per field) and the first violation wins.
//! Lengths are measured in characters, matching how Discord counts them.

use tannoy_core::{limits, Notification};

use crate::error::ValidationError;

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Checks a notification against the platform limits.
///
/// Returns the first violated constraint, or `Ok(())` for a deliverable
/// payload. Does not mutate or normalize anything; normalization happened
/// at model construction time.
pub fn validate(notification: &Notification) -> Result<(), ValidationError> {
    if notification.is_empty() {
        return Err(ValidationError::EmptyNotification);
    }

    if let Some(content) = &notification.content {
        let length = char_len(content);
        if length > limits::MAX_CONTENT_LEN {
            return Err(ValidationError::ContentTooLong { length, max: limits::MAX_CONTENT_LEN });
        }
    }

    if let Some(username) = &notification.username {
        let length = char_len(username);
        if length > limits::MAX_USERNAME_LEN {
            return Err(ValidationError::UsernameTooLong { length, max: limits::MAX_USERNAME_LEN });
        }
    }

    if notification.embeds.len() > limits::MAX_EMBEDS {
        return Err(ValidationError::TooManyEmbeds {
            count: notification.embeds.len(),
            max: limits::MAX_EMBEDS,
        });
    }

    for (embed_index, embed) in notification.embeds.iter().enumerate() {
        if let Some(color) = embed.color {
            if color > limits::MAX_COLOR {
                return Err(ValidationError::ColorOutOfRange {
                    embed: embed_index,
                    color,
                    max: limits::MAX_COLOR,
                });
            }
        }

        // Combined text budget across title, description, and all fields.
        let mut embed_total = 0;

        if let Some(title) = &embed.title {
            let length = char_len(title);
            if length > limits::MAX_TITLE_LEN {
                return Err(ValidationError::TitleTooLong {
                    embed: embed_index,
                    length,
                    max: limits::MAX_TITLE_LEN,
                });
            }
            embed_total += length;
        }

        if let Some(description) = &embed.description {
            let length = char_len(description);
            if length > limits::MAX_DESCRIPTION_LEN {
                return Err(ValidationError::DescriptionTooLong {
                    embed: embed_index,
                    length,
                    max: limits::MAX_DESCRIPTION_LEN,
                });
            }
            embed_total += length;
        }

        if embed.fields.len() > limits::MAX_FIELDS_PER_EMBED {
            return Err(ValidationError::TooManyFields {
                embed: embed_index,
                count: embed.fields.len(),
                max: limits::MAX_FIELDS_PER_EMBED,
            });
        }

        for (field_index, field) in embed.fields.iter().enumerate() {
            let name_length = char_len(&field.name);
            if name_length > limits::MAX_FIELD_NAME_LEN {
                return Err(ValidationError::FieldNameTooLong {
                    embed: embed_index,
                    field: field_index,
                    length: name_length,
                    max: limits::MAX_FIELD_NAME_LEN,
                });
            }

            let value_length = char_len(&field.value);
            if value_length > limits::MAX_FIELD_VALUE_LEN {
                return Err(ValidationError::FieldValueTooLong {
                    embed: embed_index,
                    field: field_index,
                    length: value_length,
                    max: limits::MAX_FIELD_VALUE_LEN,
                });
            }

            embed_total += name_length + value_length;
        }

        if embed_total > limits::MAX_EMBED_TOTAL_LEN {
            return Err(ValidationError::EmbedTooLarge {
                embed: embed_index,
                length: embed_total,
                max: limits::MAX_EMBED_TOTAL_LEN,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tannoy_core::{Embed, EmbedField};

    use super::*;

    fn embed_with_fields(count: usize) -> Embed {
        (0..count).fold(Embed::new(), |embed, i| {
            embed.field(EmbedField::new(format!("f{i}"), "v"))
        })
    }

    #[test]
    fn accepts_representative_payload() {
        let notification = Notification::new()
            .content("deploy finished")
            .embed(
                Embed::new()
                    .title("production")
                    .color(0x57F287)
                    .field(EmbedField::new("Version", "v1.4.2").inline(true)),
            );

        assert!(validate(&notification).is_ok());
    }

    #[test]
    fn rejects_empty_notification() {
        assert_eq!(validate(&Notification::new()), Err(ValidationError::EmptyNotification));

        // Empty content alone does not make a payload meaningful.
        assert_eq!(
            validate(&Notification::new().content("")),
            Err(ValidationError::EmptyNotification)
        );
    }

    #[test]
    fn rejects_over_long_content() {
        let notification = Notification::new().content("x".repeat(limits::MAX_CONTENT_LEN + 1));
        assert_eq!(
            validate(&notification),
            Err(ValidationError::ContentTooLong {
                length: limits::MAX_CONTENT_LEN + 1,
                max: limits::MAX_CONTENT_LEN,
            })
        );
    }

    #[test]
    fn content_length_counts_characters_not_bytes() {
        // Multi-byte characters up to the limit are fine.
        let notification = Notification::new().content("é".repeat(limits::MAX_CONTENT_LEN));
        assert!(validate(&notification).is_ok());
    }

    #[test]
    fn rejects_over_long_username() {
        let notification = Notification::new()
            .content("hi")
            .username("u".repeat(limits::MAX_USERNAME_LEN + 1));
        assert!(matches!(
            validate(&notification),
            Err(ValidationError::UsernameTooLong { .. })
        ));
    }

    #[test]
    fn rejects_too_many_embeds() {
        let notification =
            (0..=limits::MAX_EMBEDS).fold(Notification::new(), |n, _| n.embed(Embed::new()));
        assert_eq!(
            validate(&notification),
            Err(ValidationError::TooManyEmbeds {
                count: limits::MAX_EMBEDS + 1,
                max: limits::MAX_EMBEDS,
            })
        );
    }

    #[test]
    fn rejects_too_many_fields() {
        let notification =
            Notification::new().embed(embed_with_fields(limits::MAX_FIELDS_PER_EMBED + 1));
        assert!(matches!(
            validate(&notification),
            Err(ValidationError::TooManyFields { embed: 0, .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_color() {
        let notification = Notification::new().embed(Embed::new().color(limits::MAX_COLOR + 1));
        assert!(matches!(
            validate(&notification),
            Err(ValidationError::ColorOutOfRange { embed: 0, .. })
        ));
    }

    #[test]
    fn rejects_over_long_field_name_and_value() {
        let notification = Notification::new().embed(
            Embed::new().field(EmbedField::new("n".repeat(limits::MAX_FIELD_NAME_LEN + 1), "v")),
        );
        assert!(matches!(
            validate(&notification),
            Err(ValidationError::FieldNameTooLong { embed: 0, field: 0, .. })
        ));

        let notification = Notification::new().embed(
            Embed::new()
                .field(EmbedField::new("ok", "v"))
                .field(EmbedField::new("n", "v".repeat(limits::MAX_FIELD_VALUE_LEN + 1))),
        );
        assert!(matches!(
            validate(&notification),
            Err(ValidationError::FieldValueTooLong { embed: 0, field: 1, .. })
        ));
    }

    #[test]
    fn rejects_embed_exceeding_combined_budget() {
        // Six fields of 1024-character values stay under the per-field cap
        // but blow the 6000-character combined budget.
        let embed = (0..6).fold(Embed::new(), |embed, i| {
            embed.field(EmbedField::new(
                format!("f{i}"),
                "v".repeat(limits::MAX_FIELD_VALUE_LEN),
            ))
        });
        let notification = Notification::new().embed(embed);

        assert!(matches!(
            validate(&notification),
            Err(ValidationError::EmbedTooLarge { embed: 0, .. })
        ));
    }

    #[test]
    fn reports_the_offending_embed_index() {
        let notification = Notification::new()
            .embed(Embed::new().title("fine"))
            .embed(Embed::new().title("t".repeat(limits::MAX_TITLE_LEN + 1)));
        assert!(matches!(
            validate(&notification),
            Err(ValidationError::TitleTooLong { embed: 1, .. })
        ));
    }
}
