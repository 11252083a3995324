//! Command table and interaction router
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Split frozen `Router` from the mutable `CommandTable`
//! - 1.0.0: Initial implementation for name-keyed dispatch

use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::handler::CommandCallback;
use super::platform::InteractionEvent;
use crate::commands::{Command, CommandRecord};

/// One command schema paired with its callback
pub struct RegistrationEntry<I> {
    pub command: Command,
    pub callback: Arc<dyn CommandCallback<I>>,
}

impl<I> Clone for RegistrationEntry<I> {
    fn clone(&self) -> Self {
        Self {
            command: self.command.clone(),
            callback: Arc::clone(&self.callback),
        }
    }
}

/// Table mapping command names to registration entries
///
/// Inserting a name that is already present replaces the entry (last write
/// wins) but keeps its original position, so registration order stays stable.
///
/// # Example
///
/// ```ignore
/// let mut table = CommandTable::new();
/// table.insert(Command::new("ping", Some("Pong")), Arc::new(ping));
///
/// if let Some(entry) = table.get("ping") {
///     entry.callback.call(interaction).await?;
/// }
/// ```
pub struct CommandTable<I> {
    entries: Vec<RegistrationEntry<I>>,
    index: HashMap<String, usize>,
}

impl<I> CommandTable<I> {
    /// Create a new empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert or overwrite the entry for `command.name()`
    ///
    /// Returns the replaced entry, if any.
    pub fn insert(
        &mut self,
        command: Command,
        callback: Arc<dyn CommandCallback<I>>,
    ) -> Option<RegistrationEntry<I>> {
        let entry = RegistrationEntry { command, callback };
        if let Some(&slot) = self.index.get(entry.command.name()) {
            return Some(std::mem::replace(&mut self.entries[slot], entry));
        }

        self.index
            .insert(entry.command.name().to_string(), self.entries.len());
        self.entries.push(entry);
        None
    }

    /// Get the entry for a command name
    pub fn get(&self, name: &str) -> Option<&RegistrationEntry<I>> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered command names, in registration order
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.command.name())
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.entries.iter().map(|e| &e.command)
    }

    /// Build every registered schema, in registration order
    pub fn build_schemas(&self) -> Vec<CommandRecord> {
        self.entries.iter().map(|e| e.command.build()).collect()
    }
}

impl<I> Default for CommandTable<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of a command table used to route interactions
///
/// Built once when the dispatcher starts; shared with the platform adapter.
pub struct Router<I> {
    table: CommandTable<I>,
}

impl<I: InteractionEvent> Router<I> {
    pub fn new(table: CommandTable<I>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CommandTable<I> {
        &self.table
    }

    /// Route one interaction to its callback
    ///
    /// Returns `true` when a callback ran. Non-command interactions and
    /// unknown names are dropped silently; callback errors are logged.
    pub async fn dispatch(&self, interaction: I) -> bool {
        let Some(name) = interaction.command_name() else {
            debug!("Ignoring non-command interaction");
            return false;
        };
        let name = name.to_string();

        let Some(entry) = self.table.get(&name) else {
            debug!("No handler registered for /{name}; dropping interaction");
            return false;
        };

        let request_id = Uuid::new_v4();
        info!("[{request_id}] 📥 Dispatching /{name}");

        let callback = Arc::clone(&entry.callback);
        match callback.call(interaction).await {
            Ok(()) => debug!("[{request_id}] ✅ /{name} completed"),
            Err(e) => error!("[{request_id}] ❌ Handler for /{name} failed: {e:#}"),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandOption;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockInteraction(Option<&'static str>);

    impl InteractionEvent for MockInteraction {
        fn command_name(&self) -> Option<&str> {
            self.0
        }
    }

    fn counting(hits: &Arc<AtomicUsize>) -> Arc<dyn CommandCallback<MockInteraction>> {
        let hits = Arc::clone(hits);
        Arc::new(move |_: MockInteraction| {
            let hits = Arc::clone(&hits);
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                anyhow::Ok(())
            }
        })
    }

    #[test]
    fn test_table_new_is_empty() {
        let table = CommandTable::<MockInteraction>::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_table_insert_and_get() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut table = CommandTable::new();
        assert!(table
            .insert(Command::new("ping", None), counting(&hits))
            .is_none());

        assert!(table.contains("ping"));
        assert!(!table.contains("pong"));
        assert!(table.get("ping").is_some());
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn test_table_overwrite_keeps_position() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut table = CommandTable::new();
        table.insert(Command::new("a", Some("first")), counting(&hits));
        table.insert(Command::new("b", None), counting(&hits));
        let replaced = table.insert(Command::new("a", Some("second")), counting(&hits));

        assert_eq!(
            replaced.map(|e| e.command.description().map(str::to_string)),
            Some(Some("first".to_string()))
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.command_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(
            table.get("a").and_then(|e| e.command.description()),
            Some("second")
        );
    }

    #[test]
    fn test_build_schemas_in_order() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut table = CommandTable::new();
        table.insert(
            Command::new("poke", Some("Poke somebody"))
                .with_option(CommandOption::user("target", true, Some("Who to poke"))),
            counting(&hits),
        );
        table.insert(Command::new("ping", None), counting(&hits));

        let schemas = table.build_schemas();
        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[0].name, "poke");
        assert_eq!(schemas[0].options[0].kind, 6);
        assert_eq!(schemas[1].name, "ping");
    }

    #[tokio::test]
    async fn test_router_dispatches_by_name() {
        let ping = Arc::new(AtomicUsize::new(0));
        let pong = Arc::new(AtomicUsize::new(0));
        let mut table = CommandTable::new();
        table.insert(Command::new("ping", None), counting(&ping));
        table.insert(Command::new("pong", None), counting(&pong));
        let router = Router::new(table);

        assert!(router.dispatch(MockInteraction(Some("ping"))).await);
        assert!(router.dispatch(MockInteraction(Some("ping"))).await);
        assert_eq!(ping.load(Ordering::SeqCst), 2);
        assert_eq!(pong.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_router_ignores_unknown_and_non_commands() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut table = CommandTable::new();
        table.insert(Command::new("ping", None), counting(&hits));
        let router = Router::new(table);

        assert!(!router.dispatch(MockInteraction(Some("unknown"))).await);
        assert!(!router.dispatch(MockInteraction(None)).await);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_router_swallows_callback_errors() {
        let mut table = CommandTable::new();
        let failing: Arc<dyn CommandCallback<MockInteraction>> =
            Arc::new(|_: MockInteraction| async { Err::<(), _>(anyhow::anyhow!("handler broke")) });
        table.insert(Command::new("explode", None), failing);
        let router = Router::new(table);

        assert!(router.dispatch(MockInteraction(Some("explode"))).await);
    }
}
