//! Drag-and-drop file intake on the widget container.

use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::file::callbacks::read_as_text;
use gloo::file::File;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event};

use lottie_player_core::PlayerError;

use crate::bindings;
use crate::Shared;

fn cancelable() -> EventListenerOptions {
    EventListenerOptions {
        phase: EventListenerPhase::Bubble,
        passive: false,
    }
}

pub(crate) fn attach(shared: &Rc<Shared>) -> Vec<EventListener> {
    let container = &shared.widget().container;
    let mut listeners = Vec::with_capacity(3);

    let on_over = shared.clone();
    listeners.push(EventListener::new_with_options(
        container,
        "dragover",
        cancelable(),
        move |event: &Event| {
            event.prevent_default();
            on_over.act_or_report(|player| {
                player.set_drop_hover(true);
                Ok(())
            });
        },
    ));

    let on_leave = shared.clone();
    listeners.push(EventListener::new_with_options(
        container,
        "dragleave",
        cancelable(),
        move |event: &Event| {
            event.prevent_default();
            on_leave.act_or_report(|player| {
                player.set_drop_hover(false);
                Ok(())
            });
        },
    ));

    let on_drop = shared.clone();
    listeners.push(EventListener::new_with_options(
        container,
        "drop",
        cancelable(),
        move |event: &Event| {
            event.prevent_default();
            on_drop.act_or_report(|player| {
                player.set_drop_hover(false);
                Ok(())
            });
            let Some(event) = event.dyn_ref::<DragEvent>() else {
                return;
            };
            if let Err(err) = accept(&on_drop, event) {
                on_drop.report(&err);
            }
        },
    ));

    listeners
}

/// Start reading the first dropped item if it is a file.
fn accept(shared: &Rc<Shared>, event: &DragEvent) -> Result<(), PlayerError> {
    let items = event
        .data_transfer()
        .map(|transfer| transfer.items())
        .filter(|items| items.length() > 0)
        .ok_or(PlayerError::EmptyDrop)?;
    let item = items.get(0).ok_or(PlayerError::EmptyDrop)?;
    let kind = item.kind();
    if kind != "file" {
        return Err(PlayerError::NotAFile { kind });
    }
    let file = item
        .get_as_file()
        .map_err(|e| PlayerError::FileRead {
            reason: bindings::describe(&e),
        })?
        .ok_or_else(|| PlayerError::FileRead {
            reason: "item has no file".into(),
        })?;

    shared.act(|player| {
        player.begin_drop();
        Ok(())
    })?;

    let file = File::from(file);
    info!("reading dropped file {} ({} bytes)", file.name(), file.size());
    let weak = Rc::downgrade(shared);
    let reader = read_as_text(&file, move |result| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let loaded = result
            .map_err(|e| PlayerError::FileRead {
                reason: format!("{e:?}"),
            })
            .and_then(|text| shared.load_text(&text));
        if let Err(err) = loaded {
            shared.report(&err);
        }
    });
    // Replacing a pending reader aborts the older read.
    shared.keep_reader(reader);
    Ok(())
}
