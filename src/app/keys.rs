//! Key bindings.
//!
//! Catalog (normal mode):
//! - `j`/`Down`/`Ctrl+n`: move down
//! - `k`/`Up`/`Ctrl+p`: move up
//! - `Enter`: open detail
//! - `f`: toggle favorites-only filter
//! - `m`: load more
//! - `r`: reload
//! - `/`: edit query
//! - `q`: close
//!
//! Detail:
//! - `f`/`Space`: toggle favorite
//! - `b`: open buy link
//! - `Esc`/`Backspace`/`h`/`Left`: back to list
//! - `q`: close
//!
//! Query editing: characters and `Backspace` edit, `Enter` submits, `Esc`
//! cancels.

use super::handler::Event;
use super::modes::{InputMode, Screen};
use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

/// Maps a key press to an application event for the current mode and screen.
///
/// Returns `None` for unbound keys.
#[must_use]
pub fn map_key(key: &KeyWithModifier, mode: InputMode, screen: Screen) -> Option<Event> {
    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        return match (key.bare_key, mode, screen) {
            (BareKey::Char('n'), InputMode::Normal, Screen::Catalog) => Some(Event::KeyDown),
            (BareKey::Char('p'), InputMode::Normal, Screen::Catalog) => Some(Event::KeyUp),
            _ => None,
        };
    }

    match screen {
        Screen::Catalog if mode == InputMode::Query => map_query_key(key.bare_key),
        Screen::Catalog => map_catalog_key(key.bare_key),
        Screen::Detail => map_detail_key(key.bare_key),
    }
}

fn map_query_key(key: BareKey) -> Option<Event> {
    Some(match key {
        BareKey::Enter => Event::SubmitQuery,
        BareKey::Esc => Event::CancelQuery,
        BareKey::Backspace => Event::Backspace,
        BareKey::Char(c) => Event::Char(c),
        _ => return None,
    })
}

fn map_catalog_key(key: BareKey) -> Option<Event> {
    Some(match key {
        BareKey::Down | BareKey::Char('j') => Event::KeyDown,
        BareKey::Up | BareKey::Char('k') => Event::KeyUp,
        BareKey::Enter => Event::OpenSelected,
        BareKey::Char('f') => Event::ToggleFavoritesFilter,
        BareKey::Char('m') => Event::LoadMore,
        BareKey::Char('r') => Event::Reload,
        BareKey::Char('/') => Event::EditQuery,
        BareKey::Char('q') => Event::CloseFocus,
        _ => return None,
    })
}

fn map_detail_key(key: BareKey) -> Option<Event> {
    Some(match key {
        BareKey::Char('f' | ' ') => Event::ToggleFavorite,
        BareKey::Char('b') => Event::OpenBuyLink,
        BareKey::Esc | BareKey::Backspace | BareKey::Left | BareKey::Char('h') => Event::Back,
        BareKey::Char('q') => Event::CloseFocus,
        _ => return None,
    })
}
