//! In-memory page and transport doubles shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::FetchError;
use crate::fetch::{FetchResponse, RequestOptions, Transport};
use crate::nav::{NavItem, NavSource};
use crate::navigate::Navigator;

/// Nav element double; visibility is shared with the owning [`FakePage`].
#[derive(Clone, Debug)]
pub struct FakeItem {
    marker: Option<String>,
    visible: Rc<Cell<bool>>,
}

impl FakeItem {
    pub fn new(marker: Option<&str>) -> Self {
        Self {
            marker: marker.map(str::to_owned),
            visible: Rc::new(Cell::new(true)),
        }
    }

    pub fn visible(&self) -> bool {
        self.visible.get()
    }
}

impl NavItem for FakeItem {
    fn role_marker(&self) -> Option<String> {
        self.marker.clone()
    }

    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }
}

/// Page double recording navigations.
#[derive(Debug, Default)]
pub struct FakePage {
    pub items: Vec<FakeItem>,
    pub navigations: RefCell<Vec<String>>,
}

impl FakePage {
    /// One item per marker, in order.
    pub fn with_markers(markers: &[Option<&str>]) -> Self {
        Self {
            items: markers.iter().map(|m| FakeItem::new(*m)).collect(),
            navigations: RefCell::new(Vec::new()),
        }
    }

    pub fn visibility(&self) -> Vec<bool> {
        self.items.iter().map(FakeItem::visible).collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }
}

impl NavSource for FakePage {
    type Item = FakeItem;

    fn nav_items(&self) -> Vec<FakeItem> {
        self.items.clone()
    }
}

impl Navigator for FakePage {
    fn navigate(&self, route: &str) {
        self.navigations.borrow_mut().push(route.to_owned());
    }
}

/// Transport double returning queued responses and recording requests.
#[derive(Debug, Default)]
pub struct FakeTransport {
    responses: RefCell<VecDeque<Result<FetchResponse, FetchError>>>,
    pub requests: RefCell<Vec<(String, RequestOptions)>>,
}

impl FakeTransport {
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(FetchResponse {
            status,
            body: body.to_owned(),
        }));
        self
    }

    pub fn fail(self, err: FetchError) -> Self {
        self.responses.borrow_mut().push_back(Err(err));
        self
    }

    pub fn last_request(&self) -> Option<(String, RequestOptions)> {
        self.requests.borrow().last().cloned()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, url: &str, opts: &RequestOptions) -> Result<FetchResponse, FetchError> {
        self.requests
            .borrow_mut()
            .push((url.to_owned(), opts.clone()));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(FetchError::Network("no response queued".to_owned())))
    }
}
