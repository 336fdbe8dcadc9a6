//! Map module
//!
//! This module provides the live map view and its collaborators:
//! - The provider SDK seam (`MapProvider`, `MapSdk`) over an imperative map object model
//! - The map view controller that reconciles attraction markers against it
//! - Selection state for the emphasized marker
//! - A headless in-memory provider

pub mod headless;
pub mod selection;
pub mod view;

use crate::Result;
use crate::models::{Coordinates, LatLngBounds};

pub use headless::{HeadlessProvider, HeadlessSdk};
pub use selection::Selection;
pub use view::{DEFAULT_ZOOM, MapView, SELECTED_Z_INDEX};

/// Callback the provider invokes when a marker is clicked
pub type ClickHandler = Box<dyn Fn()>;

/// Options for creating a map
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: Coordinates,
    pub zoom: u8,
    pub street_view_control: bool,
    pub map_type_control: bool,
}

impl MapOptions {
    #[must_use]
    pub fn new(center: Coordinates, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            street_view_control: false,
            map_type_control: false,
        }
    }
}

/// Options for creating a marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub position: Coordinates,
    pub icon: String,
    pub title: String,
    /// Stacking priority; `None` leaves the provider default
    pub z_index: Option<i32>,
}

/// What the map currently shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: u8,
    /// Region the map was last fitted to
    pub bounds: Option<LatLngBounds>,
}

/// Loads the provider SDK
pub trait MapProvider {
    type Sdk: MapSdk;

    async fn load(&self, api_key: &str) -> Result<Self::Sdk>;
}

/// Imperative object model of a loaded mapping provider.
///
/// Handles behave like references into the provider's own object graph: cloning a
/// handle never copies the underlying object.
pub trait MapSdk: Clone + 'static {
    type Map: Clone + 'static;
    type Marker: Clone + 'static;
    type InfoWindow: Clone + 'static;
    type Listener;

    fn create_map(&self, container: &str, options: &MapOptions) -> Result<Self::Map>;

    fn set_center(&self, map: &Self::Map, center: Coordinates, zoom: u8);

    fn fit_bounds(&self, map: &Self::Map, bounds: &LatLngBounds);

    fn viewport(&self, map: &Self::Map) -> Viewport;

    fn create_marker(&self, map: &Self::Map, options: MarkerOptions) -> Self::Marker;

    /// Detach the marker from its map
    fn remove_marker(&self, marker: &Self::Marker);

    fn add_click_listener(&self, marker: &Self::Marker, handler: ClickHandler) -> Self::Listener;

    fn remove_listener(&self, listener: Self::Listener);

    fn create_info_window(&self, map: &Self::Map) -> Self::InfoWindow;

    fn open_info_window(&self, window: &Self::InfoWindow, anchor: &Self::Marker, content: &str);

    fn close_info_window(&self, window: &Self::InfoWindow);
}
