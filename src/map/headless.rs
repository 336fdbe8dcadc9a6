//! Headless map provider
//!
//! Keeps the whole provider object graph in memory so maps can be driven without a
//! rendering backend. Clicks are simulated with [`HeadlessSdk::click`].

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use tracing::debug;

use super::{ClickHandler, MapOptions, MapProvider, MapSdk, MarkerOptions, Viewport};
use crate::models::{Coordinates, LatLngBounds};
use crate::{Result, TourismError};

/// Closest zoom a fit may produce
const MAX_FIT_ZOOM: u8 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoWindowHandle(u64);

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

/// Snapshot of an info window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoWindowState {
    /// Marker the window is open on, `None` when closed
    pub anchor: Option<MarkerHandle>,
    pub content: Option<String>,
}

/// Loads a [`HeadlessSdk`]
#[derive(Debug, Clone, Default)]
pub struct HeadlessProvider {
    rejection: Option<String>,
}

impl HeadlessProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider whose load always fails with `reason`
    #[must_use]
    pub fn rejecting<S: Into<String>>(reason: S) -> Self {
        Self {
            rejection: Some(reason.into()),
        }
    }
}

impl MapProvider for HeadlessProvider {
    type Sdk = HeadlessSdk;

    async fn load(&self, api_key: &str) -> Result<HeadlessSdk> {
        if let Some(reason) = &self.rejection {
            return Err(TourismError::initialization(reason.clone()));
        }
        if api_key.trim().is_empty() {
            return Err(TourismError::initialization("maps API key is empty"));
        }
        debug!("Headless map provider loaded");
        Ok(HeadlessSdk::default())
    }
}

struct MapState {
    container: String,
    viewport: Viewport,
}

struct MarkerState {
    map: MapHandle,
    options: MarkerOptions,
}

struct ListenerState {
    marker: MarkerHandle,
    handler: Rc<dyn Fn()>,
}

#[derive(Default)]
struct Scene {
    next_id: u64,
    maps: HashMap<MapHandle, MapState>,
    markers: BTreeMap<MarkerHandle, MarkerState>,
    listeners: BTreeMap<u64, ListenerState>,
    info_windows: BTreeMap<InfoWindowHandle, (MapHandle, InfoWindowState)>,
}

impl Scene {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory provider object graph
#[derive(Clone, Default)]
pub struct HeadlessSdk {
    scene: Rc<RefCell<Scene>>,
}

impl HeadlessSdk {
    /// Markers currently attached to a map, in creation order
    #[must_use]
    pub fn live_markers(&self) -> Vec<(MarkerHandle, MarkerOptions)> {
        self.scene
            .borrow()
            .markers
            .iter()
            .map(|(handle, state)| (*handle, state.options.clone()))
            .collect()
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.scene.borrow().markers.len()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.scene.borrow().listeners.len()
    }

    /// First live marker with the given title
    #[must_use]
    pub fn find_marker(&self, title: &str) -> Option<MarkerHandle> {
        self.scene
            .borrow()
            .markers
            .iter()
            .find(|(_, state)| state.options.title == title)
            .map(|(handle, _)| *handle)
    }

    #[must_use]
    pub fn marker_options(&self, marker: MarkerHandle) -> Option<MarkerOptions> {
        self.scene
            .borrow()
            .markers
            .get(&marker)
            .map(|state| state.options.clone())
    }

    #[must_use]
    pub fn container(&self, map: MapHandle) -> Option<String> {
        self.scene
            .borrow()
            .maps
            .get(&map)
            .map(|state| state.container.clone())
    }

    /// Simulate a user click, returning how many listeners ran
    pub fn click(&self, marker: MarkerHandle) -> usize {
        let handlers: Vec<Rc<dyn Fn()>> = self
            .scene
            .borrow()
            .listeners
            .values()
            .filter(|listener| listener.marker == marker)
            .map(|listener| Rc::clone(&listener.handler))
            .collect();

        // The scene must not stay borrowed: handlers call back into the SDK.
        for handler in &handlers {
            handler();
        }
        handlers.len()
    }

    /// The first info window that is currently open
    #[must_use]
    pub fn opened_info_window(&self) -> Option<InfoWindowState> {
        self.scene
            .borrow()
            .info_windows
            .values()
            .map(|(_, state)| state)
            .find(|state| state.anchor.is_some())
            .cloned()
    }
}

impl MapSdk for HeadlessSdk {
    type Map = MapHandle;
    type Marker = MarkerHandle;
    type InfoWindow = InfoWindowHandle;
    type Listener = ListenerHandle;

    fn create_map(&self, container: &str, options: &MapOptions) -> Result<MapHandle> {
        if container.trim().is_empty() {
            return Err(TourismError::initialization("map container not found"));
        }
        let mut scene = self.scene.borrow_mut();
        let handle = MapHandle(scene.next_id());
        scene.maps.insert(
            handle,
            MapState {
                container: container.to_string(),
                viewport: Viewport {
                    center: options.center,
                    zoom: options.zoom,
                    bounds: None,
                },
            },
        );
        Ok(handle)
    }

    fn set_center(&self, map: &MapHandle, center: Coordinates, zoom: u8) {
        if let Some(state) = self.scene.borrow_mut().maps.get_mut(map) {
            state.viewport = Viewport {
                center,
                zoom,
                bounds: None,
            };
        }
    }

    fn fit_bounds(&self, map: &MapHandle, bounds: &LatLngBounds) {
        if let Some(state) = self.scene.borrow_mut().maps.get_mut(map) {
            state.viewport = Viewport {
                center: bounds.center(),
                zoom: zoom_for(bounds),
                bounds: Some(*bounds),
            };
        }
    }

    fn viewport(&self, map: &MapHandle) -> Viewport {
        let scene = self.scene.borrow();
        match scene.maps.get(map) {
            Some(state) => state.viewport,
            None => Viewport {
                center: Coordinates { lat: 0.0, lng: 0.0 },
                zoom: 0,
                bounds: None,
            },
        }
    }

    fn create_marker(&self, map: &MapHandle, options: MarkerOptions) -> MarkerHandle {
        let mut scene = self.scene.borrow_mut();
        let handle = MarkerHandle(scene.next_id());
        scene.markers.insert(handle, MarkerState { map: *map, options });
        handle
    }

    fn remove_marker(&self, marker: &MarkerHandle) {
        let mut scene = self.scene.borrow_mut();
        if let Some(state) = scene.markers.remove(marker) {
            debug!("Removed marker '{}' from map {:?}", state.options.title, state.map);
        }
    }

    fn add_click_listener(&self, marker: &MarkerHandle, handler: ClickHandler) -> ListenerHandle {
        let mut scene = self.scene.borrow_mut();
        let id = scene.next_id();
        scene.listeners.insert(
            id,
            ListenerState {
                marker: *marker,
                handler: Rc::from(handler),
            },
        );
        ListenerHandle(id)
    }

    fn remove_listener(&self, listener: ListenerHandle) {
        self.scene.borrow_mut().listeners.remove(&listener.0);
    }

    fn create_info_window(&self, map: &MapHandle) -> InfoWindowHandle {
        let mut scene = self.scene.borrow_mut();
        let handle = InfoWindowHandle(scene.next_id());
        scene
            .info_windows
            .insert(handle, (*map, InfoWindowState::default()));
        handle
    }

    fn open_info_window(&self, window: &InfoWindowHandle, anchor: &MarkerHandle, content: &str) {
        if let Some((_, state)) = self.scene.borrow_mut().info_windows.get_mut(window) {
            state.anchor = Some(*anchor);
            state.content = Some(content.to_string());
        }
    }

    fn close_info_window(&self, window: &InfoWindowHandle) {
        if let Some((_, state)) = self.scene.borrow_mut().info_windows.get_mut(window) {
            state.anchor = None;
        }
    }
}

fn zoom_for(bounds: &LatLngBounds) -> u8 {
    let (lat_span, lng_span) = bounds.span();
    let widest = lat_span.max(lng_span);
    if widest <= 0.0 {
        return MAX_FIT_ZOOM;
    }
    (360.0 / widest).log2().floor().clamp(1.0, f64::from(MAX_FIT_ZOOM)) as u8
}
