//! DOM-backed nav items and page navigation.

use wasm_bindgen::JsCast;

use super::{NavItem, NavSource};
use crate::config::ClientConfig;
use crate::navigate::Navigator;

/// A nav element whose visibility is driven through its inline `display`.
pub struct DomNavItem {
    element: web_sys::HtmlElement,
    role_attribute: String,
}

impl NavItem for DomNavItem {
    fn role_marker(&self) -> Option<String> {
        self.element.get_attribute(&self.role_attribute)
    }

    fn set_visible(&self, visible: bool) {
        let style = self.element.style();
        let result = if visible {
            style.remove_property("display").map(drop)
        } else {
            style.set_property("display", "none")
        };
        if let Err(err) = result {
            log::warn!("nav item display update failed: {err:?}");
        }
    }
}

/// The current document and location.
pub struct DomPage {
    window: web_sys::Window,
    document: web_sys::Document,
    selector: String,
    role_attribute: String,
}

impl DomPage {
    pub fn from_window(config: &ClientConfig) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            selector: config.nav_selector.clone(),
            role_attribute: config.role_attribute.clone(),
        })
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

impl NavSource for DomPage {
    type Item = DomNavItem;

    fn nav_items(&self) -> Vec<DomNavItem> {
        let list = match self.document.query_selector_all(&self.selector) {
            Ok(list) => list,
            Err(err) => {
                log::warn!("nav query failed: selector={} err={err:?}", self.selector);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| match node.dyn_into::<web_sys::HtmlElement>() {
                Ok(element) => Some(element),
                Err(node) => {
                    log::debug!("nav item skipped: not an HTML element: {}", node.node_name());
                    None
                }
            })
            .map(|element| DomNavItem {
                element,
                role_attribute: self.role_attribute.clone(),
            })
            .collect()
    }
}

impl Navigator for DomPage {
    fn navigate(&self, route: &str) {
        if let Err(err) = self.window.location().set_href(route) {
            log::warn!("navigation failed: route={route} err={err:?}");
        }
    }
}
