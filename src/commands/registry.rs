//! Command handler registry
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Reject duplicate command names instead of overwriting
//! - 1.0.0: Initial implementation for handler dispatch

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::SlashCommandHandler;
use crate::core::BotError;

/// Registry mapping command names to handlers
///
/// Built once at startup. Registering a name twice is a wiring fault and
/// fails rather than shadowing the earlier handler.
///
/// # Example
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(Arc::new(HelpCommand))?;
///
/// if let Some(handler) = registry.get("help") {
///     handler.execute(&ctx, &invoker, &command, &mut reply).await?;
/// }
/// ```
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn SlashCommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Build a registry from a handler list, failing on the first duplicate
    pub fn from_handlers(
        handlers: impl IntoIterator<Item = Arc<dyn SlashCommandHandler>>,
    ) -> Result<Self, BotError> {
        let mut registry = Self::new();
        for handler in handlers {
            registry.register(handler)?;
        }
        Ok(registry)
    }

    /// Register a handler under its declared name
    pub fn register(&mut self, handler: Arc<dyn SlashCommandHandler>) -> Result<(), BotError> {
        let name = handler.name();
        if self.handlers.contains_key(name) {
            return Err(BotError::DuplicateCommand(name.to_string()));
        }
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Get handler for a command name
    ///
    /// Returns None if no handler is registered for the given name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn SlashCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// All handlers, sorted by command name
    pub fn handlers(&self) -> Vec<Arc<dyn SlashCommandHandler>> {
        let mut handlers: Vec<_> = self.handlers.values().cloned().collect();
        handlers.sort_by_key(|handler| handler.name());
        handlers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::CommandContext;
    use crate::interaction::{ChatCommand, InteractionReply, Invoker};
    use anyhow::Result;
    use async_trait::async_trait;

    // Mock handler for testing
    struct MockHandler {
        name: &'static str,
    }

    #[async_trait]
    impl SlashCommandHandler for MockHandler {
        fn name(&self) -> &'static str {
            self.name
        }

        fn description(&self) -> &'static str {
            "mock"
        }

        async fn execute(
            &self,
            _ctx: &CommandContext,
            _invoker: &Invoker,
            _command: &ChatCommand,
            _reply: &mut InteractionReply,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_register_single() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler { name: "help" })).unwrap();

        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("help"));
        assert!(!registry.contains("pong"));
    }

    #[test]
    fn test_registry_rejects_duplicate() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler { name: "help" })).unwrap();
        let result = registry.register(Arc::new(MockHandler { name: "help" }));

        assert!(matches!(result, Err(BotError::DuplicateCommand(name)) if name == "help"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_get_returns_handler() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler { name: "test" })).unwrap();

        let handler = registry.get("test");
        assert!(handler.is_some());

        let missing = registry.get("missing");
        assert!(missing.is_none());
    }

    #[test]
    fn test_handlers_sorted_by_name() {
        let handlers: Vec<Arc<dyn SlashCommandHandler>> = vec![
            Arc::new(MockHandler { name: "show-builds" }),
            Arc::new(MockHandler { name: "help" }),
        ];
        let registry = CommandRegistry::from_handlers(handlers).unwrap();
        let names: Vec<_> = registry.handlers().iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["help", "show-builds"]);
    }

    #[test]
    fn test_registry_default() {
        let registry = CommandRegistry::default();
        assert!(registry.is_empty());
    }
}
