//! Serenity-backed interaction transport
//!
//! Maps the domain responses onto Discord interaction callbacks. The three
//! interaction payload types expose the same callback endpoints and share
//! one builder per response kind.

use anyhow::{bail, Result};
use async_trait::async_trait;
use serenity::builder::{
    CreateComponents, CreateInputText, CreateInteractionResponse,
    CreateInteractionResponseFollowup,
};
use serenity::http::Http;
use serenity::model::application::component::{ButtonStyle as SerenityButtonStyle, InputTextStyle};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::modal::ModalSubmitInteraction;
use serenity::model::application::interaction::{
    Interaction as SerenityInteraction, InteractionResponseType,
};
use std::sync::Arc;

use crate::core::{
    ActionRow, ButtonStyle, Component, InputStyle, Modal, OutgoingMessage, TextInput,
};
use crate::interaction::InteractionResponder;

pub enum InteractionPayload {
    Command(ApplicationCommandInteraction),
    Component(MessageComponentInteraction),
    ModalSubmit(ModalSubmitInteraction),
}

impl InteractionPayload {
    pub fn from_interaction(interaction: SerenityInteraction) -> Option<Self> {
        match interaction {
            SerenityInteraction::ApplicationCommand(command) => Some(Self::Command(command)),
            SerenityInteraction::MessageComponent(component) => Some(Self::Component(component)),
            SerenityInteraction::ModalSubmit(modal) => Some(Self::ModalSubmit(modal)),
            _ => None,
        }
    }
}

/// Run the same callback against whichever payload type is held
macro_rules! on_payload {
    ($payload:expr, $interaction:ident => $body:expr) => {
        match $payload {
            InteractionPayload::Command($interaction) => $body,
            InteractionPayload::Component($interaction) => $body,
            InteractionPayload::ModalSubmit($interaction) => $body,
        }
    };
}

pub struct SerenityResponder {
    http: Arc<Http>,
    payload: InteractionPayload,
}

impl SerenityResponder {
    pub fn new(http: Arc<Http>, payload: InteractionPayload) -> Self {
        Self { http, payload }
    }
}

#[async_trait]
impl InteractionResponder for SerenityResponder {
    async fn reply(&self, message: &OutgoingMessage) -> Result<()> {
        on_payload!(&self.payload, interaction => {
            interaction
                .create_interaction_response(&self.http, |response| {
                    message_response(response, message)
                })
                .await?
        });
        Ok(())
    }

    async fn defer(&self, ephemeral: bool) -> Result<()> {
        on_payload!(&self.payload, interaction => {
            interaction
                .create_interaction_response(&self.http, |response| {
                    response
                        .kind(InteractionResponseType::DeferredChannelMessageWithSource)
                        .interaction_response_data(|data| data.ephemeral(ephemeral))
                })
                .await?
        });
        Ok(())
    }

    async fn follow_up(&self, message: &OutgoingMessage) -> Result<()> {
        on_payload!(&self.payload, interaction => {
            interaction
                .create_followup_message(&self.http, |followup| {
                    followup_message(followup, message)
                })
                .await?
        });
        Ok(())
    }

    async fn edit_reply(&self, content: &str) -> Result<()> {
        on_payload!(&self.payload, interaction => {
            interaction
                .edit_original_interaction_response(&self.http, |response| {
                    response.content(content)
                })
                .await?
        });
        Ok(())
    }

    async fn show_modal(&self, modal: &Modal) -> Result<()> {
        match &self.payload {
            InteractionPayload::Command(command) => {
                command
                    .create_interaction_response(&self.http, |response| {
                        modal_response(response, modal)
                    })
                    .await?
            }
            InteractionPayload::Component(component) => {
                component
                    .create_interaction_response(&self.http, |response| {
                        modal_response(response, modal)
                    })
                    .await?
            }
            InteractionPayload::ModalSubmit(_) => {
                bail!("a form submission cannot be answered with another form")
            }
        }
        Ok(())
    }

    async fn update_message(&self, content: &str) -> Result<()> {
        let InteractionPayload::Component(component) = &self.payload else {
            bail!("only component interactions can update their message");
        };
        component
            .create_interaction_response(&self.http, |response| {
                response
                    .kind(InteractionResponseType::UpdateMessage)
                    .interaction_response_data(|data| data.content(content))
            })
            .await?;
        Ok(())
    }
}

fn message_response<'a, 'b>(
    response: &'b mut CreateInteractionResponse<'a>,
    message: &OutgoingMessage,
) -> &'b mut CreateInteractionResponse<'a> {
    response
        .kind(InteractionResponseType::ChannelMessageWithSource)
        .interaction_response_data(|data| {
            data.content(&message.content)
                .ephemeral(message.ephemeral)
                .components(|components| fill_components(components, &message.components))
        })
}

fn followup_message<'a, 'b>(
    followup: &'b mut CreateInteractionResponseFollowup<'a>,
    message: &OutgoingMessage,
) -> &'b mut CreateInteractionResponseFollowup<'a> {
    followup
        .content(&message.content)
        .ephemeral(message.ephemeral)
        .components(|components| fill_components(components, &message.components))
}

fn modal_response<'a, 'b>(
    response: &'b mut CreateInteractionResponse<'a>,
    modal: &Modal,
) -> &'b mut CreateInteractionResponse<'a> {
    response
        .kind(InteractionResponseType::Modal)
        .interaction_response_data(|data| {
            data.custom_id(&modal.custom_id)
                .title(&modal.title)
                .components(|components| {
                    for input in &modal.inputs {
                        components.create_action_row(|row| {
                            row.create_input_text(|text| fill_input(text, input))
                        });
                    }
                    components
                })
        })
}

/// Append one Discord action row per domain row
pub fn fill_components<'c>(
    components: &'c mut CreateComponents,
    rows: &[ActionRow],
) -> &'c mut CreateComponents {
    for row in rows {
        components.create_action_row(|action_row| {
            for component in &row.components {
                match component {
                    Component::Button {
                        custom_id,
                        label,
                        style,
                    } => {
                        action_row.create_button(|button| {
                            button
                                .custom_id(custom_id)
                                .label(label)
                                .style(button_style(*style))
                        });
                    }
                    Component::SelectMenu {
                        custom_id,
                        placeholder,
                        options,
                    } => {
                        action_row.create_select_menu(|menu| {
                            menu.custom_id(custom_id)
                                .placeholder(placeholder)
                                .options(|menu_options| {
                                    for option in options {
                                        menu_options.create_option(|menu_option| {
                                            menu_option.label(&option.label).value(&option.value);
                                            if let Some(description) = &option.description {
                                                menu_option.description(description);
                                            }
                                            menu_option
                                        });
                                    }
                                    menu_options
                                })
                        });
                    }
                }
            }
            action_row
        });
    }
    components
}

fn fill_input<'t>(
    text: &'t mut CreateInputText,
    input: &TextInput,
) -> &'t mut CreateInputText {
    text.custom_id(&input.custom_id)
        .label(&input.label)
        .style(match input.style {
            InputStyle::Short => InputTextStyle::Short,
            InputStyle::Paragraph => InputTextStyle::Paragraph,
        })
        .required(input.required);
    if let Some(placeholder) = &input.placeholder {
        text.placeholder(placeholder);
    }
    if let Some(value) = &input.value {
        text.value(value);
    }
    if let Some(min) = input.min_length {
        text.min_length(min);
    }
    if let Some(max) = input.max_length {
        text.max_length(max);
    }
    text
}

fn button_style(style: ButtonStyle) -> SerenityButtonStyle {
    match style {
        ButtonStyle::Primary => SerenityButtonStyle::Primary,
        ButtonStyle::Secondary => SerenityButtonStyle::Secondary,
        ButtonStyle::Success => SerenityButtonStyle::Success,
        ButtonStyle::Danger => SerenityButtonStyle::Danger,
    }
}
