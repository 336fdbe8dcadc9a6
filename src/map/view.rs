//! Map view controller
//!
//! Owns one live map and the provider markers shown on it. Every `sync` replaces the
//! whole marker set: previous listeners and markers are disposed, then fresh ones are
//! created from the input list. Marker sets are small and re-syncs follow user actions,
//! so no diffing is done.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use tracing::{debug, info, instrument, warn};

use super::{ClickHandler, MapOptions, MapProvider, MapSdk, MarkerOptions, Viewport};
use crate::config::MapsConfig;
use crate::models::{AttractionMarker, Coordinates, LatLngBounds};
use crate::{Result, TourismError};

/// Configured zoom unless overridden
pub const DEFAULT_ZOOM: u8 = 13;

/// Stacking priority of the selected marker; all others keep the provider default
pub const SELECTED_Z_INDEX: i32 = 1000;

struct TrackedMarker<S: MapSdk> {
    id: String,
    marker: S::Marker,
    listener: S::Listener,
}

/// One live map and its markers
pub struct MapView<S: MapSdk> {
    sdk: S,
    map: S::Map,
    info_window: S::InfoWindow,
    tracked: Vec<TrackedMarker<S>>,
    /// Id of the marker the popup is open on
    popup_anchor: Rc<RefCell<Option<String>>>,
    released: bool,
}

impl<S: MapSdk> MapView<S> {
    /// Load the provider and create the map inside `container`.
    ///
    /// Without an explicit `zoom` the configured default zoom is used.
    #[instrument(skip(provider, config))]
    pub async fn mount<P>(
        provider: &P,
        config: &MapsConfig,
        container: &str,
        center: Coordinates,
        zoom: Option<u8>,
    ) -> Result<Self>
    where
        P: MapProvider<Sdk = S>,
    {
        let api_key = config.require_api_key()?;
        let zoom = zoom.unwrap_or(config.default_zoom);

        let sdk = provider.load(api_key).await.map_err(as_initialization)?;
        let map = sdk
            .create_map(container, &MapOptions::new(center, zoom))
            .map_err(as_initialization)?;
        let info_window = sdk.create_info_window(&map);

        info!(
            "Map mounted in '{}' at {} (zoom {})",
            container,
            center.format_coordinates(),
            zoom
        );

        Ok(Self {
            sdk,
            map,
            info_window,
            tracked: Vec::new(),
            popup_anchor: Rc::default(),
            released: false,
        })
    }

    /// Make the live markers match `markers` one-to-one by id.
    ///
    /// The marker whose id equals `selected_id` is stacked above all others. A click
    /// invokes `on_marker_click` once with the marker value and opens the popup on it.
    /// Repeated ids keep their first occurrence. An open popup follows its marker
    /// across the sync and closes when that marker is gone.
    pub fn sync<F>(&mut self, markers: &[AttractionMarker], selected_id: Option<&str>, on_marker_click: F)
    where
        F: Fn(&AttractionMarker) + 'static,
    {
        let anchored = self.popup_anchor.borrow_mut().take();
        self.clear_markers();

        let on_click: Rc<dyn Fn(&AttractionMarker)> = Rc::new(on_marker_click);
        let mut seen = HashSet::with_capacity(markers.len());

        for marker in markers {
            if !seen.insert(marker.id.as_str()) {
                warn!("Skipping duplicate marker id '{}' ({})", marker.id, marker.name);
                continue;
            }

            let options = MarkerOptions {
                position: marker.position(),
                icon: marker.icon(),
                title: marker.name.clone(),
                z_index: (selected_id == Some(marker.id.as_str())).then_some(SELECTED_Z_INDEX),
            };
            let handle = self.sdk.create_marker(&self.map, options);
            let handler = self.click_handler(marker, &handle, Rc::clone(&on_click));
            let listener = self.sdk.add_click_listener(&handle, handler);

            if anchored.as_deref() == Some(marker.id.as_str()) {
                self.sdk
                    .open_info_window(&self.info_window, &handle, &popup_content(marker));
                *self.popup_anchor.borrow_mut() = Some(marker.id.clone());
                debug!("Reopened popup on '{}'", marker.id);
            }

            self.tracked.push(TrackedMarker {
                id: marker.id.clone(),
                marker: handle,
                listener,
            });
        }

        debug!(
            "Synchronized {} markers (selected: {:?})",
            self.tracked.len(),
            selected_id
        );
    }

    /// Fit the viewport to every marker; an empty list leaves it unchanged
    pub fn fit_to_markers(&self, markers: &[AttractionMarker]) {
        let Some(bounds) = LatLngBounds::from_points(markers.iter().map(AttractionMarker::position))
        else {
            debug!("No markers to fit, keeping viewport");
            return;
        };
        self.sdk.fit_bounds(&self.map, &bounds);
    }

    pub fn set_center(&self, center: Coordinates, zoom: u8) {
        self.sdk.set_center(&self.map, center, zoom);
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.sdk.viewport(&self.map)
    }

    /// Ids of the live markers in creation order
    #[must_use]
    pub fn marker_ids(&self) -> Vec<&str> {
        self.tracked.iter().map(|t| t.id.as_str()).collect()
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.tracked.len()
    }

    #[must_use]
    pub fn sdk(&self) -> &S {
        &self.sdk
    }

    /// Release every listener and marker. Also happens on drop.
    pub fn unmount(mut self) {
        self.release();
        info!("Map unmounted");
    }

    fn click_handler(
        &self,
        marker: &AttractionMarker,
        handle: &S::Marker,
        on_click: Rc<dyn Fn(&AttractionMarker)>,
    ) -> ClickHandler {
        let sdk = self.sdk.clone();
        let window = self.info_window.clone();
        let anchor = handle.clone();
        let content = popup_content(marker);
        let value = marker.clone();
        let popup_anchor = Rc::clone(&self.popup_anchor);

        Box::new(move || {
            on_click(&value);
            sdk.open_info_window(&window, &anchor, &content);
            *popup_anchor.borrow_mut() = Some(value.id.clone());
        })
    }

    fn clear_markers(&mut self) {
        if self.tracked.is_empty() {
            return;
        }

        // Listeners go first: no click may reach a marker that is being torn down.
        let mut markers = Vec::with_capacity(self.tracked.len());
        for tracked in std::mem::take(&mut self.tracked) {
            self.sdk.remove_listener(tracked.listener);
            markers.push(tracked.marker);
        }
        for marker in &markers {
            self.sdk.remove_marker(marker);
        }
        self.sdk.close_info_window(&self.info_window);
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.clear_markers();
        self.sdk.close_info_window(&self.info_window);
        self.popup_anchor.borrow_mut().take();
        self.released = true;
    }
}

impl<S: MapSdk> Drop for MapView<S> {
    fn drop(&mut self) {
        self.release();
    }
}

fn as_initialization(err: TourismError) -> TourismError {
    match err {
        TourismError::Initialization { .. } => err,
        other => TourismError::initialization(other.to_string()),
    }
}

fn popup_content(marker: &AttractionMarker) -> String {
    format!(
        "<div><h3>{}</h3><p>Categoría: {}</p></div>",
        escape_html(&marker.name),
        escape_html(marker.category.as_str())
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
