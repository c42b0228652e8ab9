//! Outgoing message, component and modal descriptions
//!
//! Handlers describe what to send with these plain values; the Discord adapter
//! turns them into serenity builders. Keeping them platform-free lets the
//! dispatcher and the pattern handlers be tested without a gateway.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add select menus and modal inputs
//! - 1.0.0: Initial message and button types

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Button {
        custom_id: String,
        label: String,
        style: ButtonStyle,
    },
    SelectMenu {
        custom_id: String,
        placeholder: String,
        options: Vec<SelectOption>,
    },
}

/// One row of components (Discord allows five buttons or one select menu per row)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRow {
    pub components: Vec<Component>,
}

impl ActionRow {
    pub fn button(
        custom_id: impl Into<String>,
        label: impl Into<String>,
        style: ButtonStyle,
    ) -> Self {
        Self {
            components: vec![Component::Button {
                custom_id: custom_id.into(),
                label: label.into(),
                style,
            }],
        }
    }

    pub fn with_button(
        mut self,
        custom_id: impl Into<String>,
        label: impl Into<String>,
        style: ButtonStyle,
    ) -> Self {
        self.components.push(Component::Button {
            custom_id: custom_id.into(),
            label: label.into(),
            style,
        });
        self
    }

    pub fn select_menu(
        custom_id: impl Into<String>,
        placeholder: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            components: vec![Component::SelectMenu {
                custom_id: custom_id.into(),
                placeholder: placeholder.into(),
                options,
            }],
        }
    }
}

/// A message sent as an interaction reply, follow-up, or channel post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub content: String,
    pub ephemeral: bool,
    pub components: Vec<ActionRow>,
}

impl OutgoingMessage {
    /// Public message visible to the whole channel
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: truncate_for_message(content.into()),
            ephemeral: false,
            components: Vec::new(),
        }
    }

    /// Message visible only to the invoking user
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            ephemeral: true,
            ..Self::public(content)
        }
    }

    pub fn with_row(mut self, row: ActionRow) -> Self {
        self.components.push(row);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStyle {
    Short,
    Paragraph,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub custom_id: String,
    pub label: String,
    pub style: InputStyle,
    pub placeholder: Option<String>,
    pub value: Option<String>,
    pub required: bool,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
}

impl TextInput {
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>, style: InputStyle) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style,
            placeholder: None,
            value: None,
            required: false,
            min_length: None,
            max_length: None,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Pre-fill the input. Discord rejects empty prefilled values, so those are dropped.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.value = (!value.is_empty()).then_some(value);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn length(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }
}

/// A form presented in response to a command or button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub custom_id: String,
    pub title: String,
    pub inputs: Vec<TextInput>,
}

impl Modal {
    pub fn new(custom_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            title: title.into(),
            inputs: Vec::new(),
        }
    }

    pub fn input(mut self, input: TextInput) -> Self {
        self.inputs.push(input);
        self
    }
}

/// Truncate text to fit the message limit, adding ellipsis if needed
pub fn truncate_for_message(text: String) -> String {
    if text.len() <= MESSAGE_LIMIT {
        return text;
    }
    // Find a safe UTF-8 boundary
    let mut end = MESSAGE_LIMIT - 3;
    while !text.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ephemeral_sets_flag() {
        let message = OutgoingMessage::ephemeral("hidden");
        assert!(message.ephemeral);
        assert_eq!(message.content, "hidden");
        assert!(message.components.is_empty());
    }

    #[test]
    fn test_long_content_is_truncated() {
        let message = OutgoingMessage::public("a".repeat(3000));
        assert!(message.content.len() <= MESSAGE_LIMIT);
        assert!(message.content.ends_with("..."));
    }

    #[test]
    fn test_truncate_respects_utf8() {
        let text = "世界".repeat(1000);
        let truncated = truncate_for_message(text);
        assert!(truncated.len() <= MESSAGE_LIMIT);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_empty_prefill_is_dropped() {
        let input = TextInput::new("goal_description", "Description", InputStyle::Paragraph)
            .value("");
        assert_eq!(input.value, None);

        let input = input.value("Buy the land claim");
        assert_eq!(input.value.as_deref(), Some("Buy the land claim"));
    }

    #[test]
    fn test_row_builders() {
        let row = ActionRow::button("update_goal_x", "Update", ButtonStyle::Primary)
            .with_button("delete_goal_x", "Delete", ButtonStyle::Danger);
        assert_eq!(row.components.len(), 2);
    }
}
