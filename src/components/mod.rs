//! # Message Components
//!
//! Pattern handlers for buttons, modal submissions and select menus. Each
//! owns an ordered route table over custom ids and is a plain function from
//! the interaction payload and shared context to a terminal [`Response`].
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Ordered route tables replace string switch dispatch
//! - 1.1.0: Goal update and delete forms
//! - 1.0.0: Farming button and map selector
//!
//! [`Response`]: crate::interaction::Response

pub mod buttons;
pub mod forms;
pub mod modals;
pub mod routes;
pub mod select_menus;

pub use buttons::handle_button;
pub use forms::handle_form;
pub use select_menus::handle_select;
