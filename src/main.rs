//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the zbooks library and
//! the Zellij plugin system. It translates host events into library events,
//! runs the library's event handler and turns the returned actions into host
//! calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, `WebRequestResult`, `RunCommandResult`
//!    and `PermissionRequestResult` events
//! 3. **Start**: Once permissions are granted, fetch the first page
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → [`zbooks::map_key`] for the current mode and screen
//! - `WebRequestResult` → `Event::PageFetched` when the context carries a
//!   page ticket
//! - `PermissionRequestResult(Granted)` → `Event::Start`
//!
//! # Actions
//!
//! - `FetchPage` → `web_request` with the ticket as context
//! - `OpenUrl` → `run_command` with the configured open command
//! - `CloseFocus` → `hide_self`

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
mod plugin {
    use std::collections::BTreeMap;
    use zbooks::search::PageTicket;
    use zbooks::{handle_event, map_key, Action, Config, Event, FetchOutcome};
    use zellij_tile::prelude::*;

    /// Plugin state wrapper.
    ///
    /// Wraps the library's `AppState` with the host-side settings it needs to
    /// execute actions.
    pub struct State {
        /// Core application state from library layer.
        app: zbooks::AppState,

        /// Program that opens buy links.
        open_command: String,
    }

    impl Default for State {
        fn default() -> Self {
            let default_config = Config::default();
            Self {
                app: zbooks::initialize(&default_config),
                open_command: default_config.open_command,
            }
        }
    }

    impl ZellijPlugin for State {
        /// Initializes the plugin on load.
        ///
        /// # Permissions
        ///
        /// - `WebAccess`: Search requests
        /// - `RunCommands`: Opening buy links
        /// - `FullHdAccess`: Favorites file and log file
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            zbooks::observability::init_tracing(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            tracing::debug!(query = %config.query, page_size = config.page_size, source = ?config.source, "parsed configuration");
            self.app = zbooks::initialize(&config);
            self.open_command = config.open_command;

            request_permission(&[
                PermissionType::WebAccess,
                PermissionType::RunCommands,
                PermissionType::FullHdAccess,
            ]);

            subscribe(&[
                EventType::Key,
                EventType::WebRequestResult,
                EventType::RunCommandResult,
                EventType::PermissionRequestResult,
            ]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        /// Handles incoming Zellij events.
        ///
        /// Returns `true` if the UI should re-render.
        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::get_event_name(&event);
            let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
            let _guard = span.entered();

            let our_event = match event {
                zellij_tile::prelude::Event::Key(ref key) => {
                    tracing::debug!(bare_key = ?key.bare_key, "key event");
                    match map_key(key, self.app.input_mode, self.app.screen) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                    match PageTicket::from_context(&context) {
                        Some(ticket) => {
                            tracing::debug!(status, body_len = body.len(), generation = ticket.generation, "page response");
                            Event::PageFetched {
                                ticket,
                                outcome: FetchOutcome { status, body },
                            }
                        }
                        None => {
                            tracing::debug!(status, "ignoring web response without page ticket");
                            return false;
                        }
                    }
                }
                zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                    PermissionStatus::Granted => {
                        tracing::debug!("permissions granted - starting catalog");
                        Event::Start
                    }
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - catalog cannot be fetched");
                        return false;
                    }
                },
                zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, _context) => {
                    if exit_code == Some(0) {
                        tracing::debug!("open command finished");
                    } else {
                        let error = String::from_utf8_lossy(&stderr);
                        tracing::warn!(exit_code = ?exit_code, error = %error, "open command failed");
                    }
                    return false;
                }
                _ => return false,
            };

            match handle_event(&mut self.app, &our_event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = should_render,
                        "event handled successfully"
                    );
                    for a in actions {
                        self.execute_action(&a);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            zbooks::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        /// Gets a string name for a Zellij event for logging purposes.
        fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
                zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                    format!("WebRequestResult({status})")
                }
                zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
                zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                    "PermissionRequestResult".to_string()
                }
                _ => "Other".to_string(),
            }
        }

        /// Executes an action returned from event handling.
        #[tracing::instrument(level = "debug", skip(self))]
        fn execute_action(&self, action: &Action) {
            match action {
                Action::FetchPage { url, ticket } => {
                    tracing::debug!(url = %url, generation = ticket.generation, "fetching page");
                    web_request(
                        url,
                        HttpVerb::Get,
                        BTreeMap::new(),
                        Vec::new(),
                        ticket.to_context(),
                    );
                }
                Action::OpenUrl { url } => {
                    tracing::debug!(url = %url, command = %self.open_command, "opening url");
                    run_command(&[self.open_command.as_str(), url.as_str()], BTreeMap::new());
                }
                Action::CloseFocus => {
                    tracing::debug!("closing plugin focus");
                    hide_self();
                }
            }
        }
    }
}

#[cfg(target_family = "wasm")]
use plugin::State;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
zellij_tile::register_plugin!(State);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("zbooks is a Zellij plugin; build it for wasm32-wasip1 and load it from a Zellij layout");
}
