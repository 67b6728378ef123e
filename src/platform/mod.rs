//! Browser DOM helpers
//!
//! Overlays are plain elements toggled with a `hidden` class; text is set
//! through `textContent`.

use anyhow::{Context, anyhow};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, Window};

use crate::game::Screen;

pub fn window() -> anyhow::Result<Window> {
    web_sys::window().context("no window")
}

pub fn document() -> anyhow::Result<Document> {
    window()?.document().context("no document")
}

/// Look up an element the page must provide
pub fn require_element(document: &Document, id: &str) -> anyhow::Result<Element> {
    document
        .get_element_by_id(id)
        .with_context(|| format!("missing #{id} element"))
}

pub fn require_canvas(document: &Document, id: &str) -> anyhow::Result<HtmlCanvasElement> {
    require_element(document, id)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| anyhow!("#{id} is not a canvas"))
}

/// Check every overlay a screen can show is present
pub fn check_overlays(document: &Document) -> anyhow::Result<()> {
    for screen in Screen::ALL {
        require_element(document, screen.overlay_id())?;
    }
    for id in ["hud-score", "hud-lives", "hud-fps", "final-score", "final-rank"] {
        require_element(document, id)?;
    }
    Ok(())
}

pub fn set_visible(document: &Document, id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.class_list().toggle_with_force("hidden", !visible);
    }
}

/// Show exactly the overlay for `active`
pub fn show_screen(document: &Document, active: Screen) {
    for screen in Screen::ALL {
        set_visible(document, screen.overlay_id(), screen == active);
    }
    // The HUD stays up behind the pause and game over cards
    if matches!(active, Screen::Paused | Screen::GameOver) {
        set_visible(document, Screen::Playing.overlay_id(), true);
    }
}

/// Set text content, skipping the DOM write when unchanged
pub fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id)
        && el.text_content().as_deref() != Some(text)
    {
        el.set_text_content(Some(text));
    }
}

/// Replace the page with a message (fatal errors, quit)
pub fn show_message(id: &str, text: &str) {
    let Ok(document) = document() else { return };
    for screen in Screen::ALL {
        set_visible(&document, screen.overlay_id(), false);
    }
    set_text(&document, id, text);
    set_visible(&document, id, true);
}
