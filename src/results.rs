//! Itinerary results: map markers plus a numbered list
//!
//! [`ResultsPresentation`] is the pure derivation from a recommendation response.
//! [`ResultsView`] puts it on a live map and keeps the marker emphasis in step with
//! the selection.

use tracing::info;

use crate::Result;
use crate::config::MapsConfig;
use crate::map::{MapProvider, MapSdk, MapView, Selection};
use crate::models::{Attraction, AttractionMarker, Coordinates, Price, TourismCategory};

/// Map center when the itinerary is empty (Madrid)
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 40.4168,
    lng: -3.7038,
};

/// Zoom used for result maps
pub const RESULTS_ZOOM: u8 = 12;

/// One numbered stop of the itinerary list
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryEntry {
    /// 1-based position in the itinerary
    pub position: usize,
    pub id: String,
    pub name: String,
    pub visit_minutes: u32,
    pub price: Price,
    pub categories: Vec<TourismCategory>,
    /// Great-circle distance from the previous stop
    pub distance_from_previous_km: Option<f64>,
}

impl ItineraryEntry {
    /// Duration and price line, e.g. `Duración: 90 minutos, Precio: 10€ (Adulto)`
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Duración: {} minutos, Precio: {}",
            self.visit_minutes,
            format_price(&self.price)
        )
    }
}

/// Adult price always; child and senior prices only when present and non-zero
#[must_use]
pub fn format_price(price: &Price) -> String {
    let symbol = price.currency.symbol();
    let mut line = format!("{}{symbol} (Adulto)", price.adult);
    if let Some(child) = price.child.filter(|amount| *amount != 0.0) {
        line.push_str(&format!(", {child}{symbol} (Niño)"));
    }
    if let Some(senior) = price.senior.filter(|amount| *amount != 0.0) {
        line.push_str(&format!(", {senior}{symbol} (Senior)"));
    }
    line
}

/// Everything the results page shows for one response
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsPresentation {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<AttractionMarker>,
    pub entries: Vec<ItineraryEntry>,
}

impl ResultsPresentation {
    #[must_use]
    pub fn from_response(response: &[Attraction]) -> Self {
        let center = response
            .first()
            .map(|attraction| attraction.location)
            .unwrap_or(DEFAULT_CENTER);

        let markers = response.iter().map(AttractionMarker::from).collect();

        let entries = response
            .iter()
            .enumerate()
            .map(|(index, attraction)| ItineraryEntry {
                position: index + 1,
                id: attraction.id.clone(),
                name: attraction.name.clone(),
                visit_minutes: attraction.average_visit_duration,
                price: attraction.price.clone(),
                categories: attraction.categories.clone(),
                distance_from_previous_km: index
                    .checked_sub(1)
                    .map(|previous| response[previous].location.distance_km(&attraction.location)),
            })
            .collect();

        Self {
            center,
            zoom: RESULTS_ZOOM,
            markers,
            entries,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a 1-based list position
    #[must_use]
    pub fn entry(&self, position: usize) -> Option<&ItineraryEntry> {
        self.entries.get(position.checked_sub(1)?)
    }
}

/// Results page bound to a live map
pub struct ResultsView<S: MapSdk> {
    map: MapView<S>,
    selection: Selection,
    presentation: ResultsPresentation,
    synced_revision: u64,
}

impl<S: MapSdk> ResultsView<S> {
    pub async fn mount<P>(
        provider: &P,
        config: &MapsConfig,
        container: &str,
        response: &[Attraction],
    ) -> Result<Self>
    where
        P: MapProvider<Sdk = S>,
    {
        let presentation = ResultsPresentation::from_response(response);
        let map = MapView::mount(
            provider,
            config,
            container,
            presentation.center,
            Some(presentation.zoom),
        )
        .await?;

        let mut view = Self {
            map,
            selection: Selection::new(),
            presentation,
            synced_revision: 0,
        };
        view.render();
        view.map.fit_to_markers(&view.presentation.markers);
        Ok(view)
    }

    /// Replace the displayed itinerary
    pub fn show(&mut self, response: &[Attraction]) {
        self.presentation = ResultsPresentation::from_response(response);
        self.selection.clear();
        self.map
            .set_center(self.presentation.center, self.presentation.zoom);
        self.render();
        self.map.fit_to_markers(&self.presentation.markers);
        info!("Showing itinerary with {} stops", self.presentation.entries.len());
    }

    /// Re-sync the markers if the selection changed since the last sync
    pub fn refresh(&mut self) -> bool {
        if self.selection.revision() == self.synced_revision {
            return false;
        }
        self.render();
        true
    }

    /// List click: select the marker of the entry at `position` (1-based)
    pub fn select_entry(&mut self, position: usize) -> Option<&ItineraryEntry> {
        let entry = self.presentation.entry(position)?;
        info!("Itinerary entry {} selected: {}", entry.position, entry.name);
        let id = entry.id.clone();

        self.selection.select(&id);
        self.refresh();
        self.presentation.entry(position)
    }

    #[must_use]
    pub fn presentation(&self) -> &ResultsPresentation {
        &self.presentation
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn map(&self) -> &MapView<S> {
        &self.map
    }

    pub fn unmount(self) {
        self.map.unmount();
    }

    fn render(&mut self) {
        let selection = self.selection.clone();
        let selected = self.selection.selected_id();
        self.map.sync(
            &self.presentation.markers,
            selected.as_deref(),
            move |marker| {
                info!("Attraction selected: {} ({})", marker.name, marker.id);
                selection.select(&marker.id);
            },
        );
        self.synced_revision = self.selection.revision();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{HeadlessProvider, HeadlessSdk, SELECTED_Z_INDEX};

    fn palacio_real() -> Attraction {
        serde_json::from_str(
            r#"{
                "id": "1",
                "name": "Palacio Real",
                "description": "",
                "location": {"lat": 40.4168, "lng": -3.7038},
                "categories": ["museum"],
                "openingHours": {"weekdays": {"open": 10, "close": 18}, "daysOpen": [1, 2, 3, 4, 5]},
                "price": {"adult": 10, "currency": "EUR"},
                "averageVisitDuration": 90,
                "popularity": 9
            }"#,
        )
        .unwrap()
    }

    fn retiro() -> Attraction {
        let mut attraction = palacio_real();
        attraction.id = "2".to_string();
        attraction.name = "Parque del Retiro".to_string();
        attraction.location = Coordinates::new(40.4153, -3.6845).unwrap();
        attraction.categories = Vec::new();
        attraction.price.child = Some(5.0);
        attraction.price.senior = Some(7.5);
        attraction
    }

    fn maps_config() -> MapsConfig {
        MapsConfig {
            api_key: Some("test-maps-key".to_string()),
            ..MapsConfig::default()
        }
    }

    #[test]
    fn test_single_attraction_presentation() {
        let presentation = ResultsPresentation::from_response(&[palacio_real()]);
        assert_eq!(presentation.center, Coordinates { lat: 40.4168, lng: -3.7038 });
        assert_eq!(presentation.markers.len(), 1);
        assert_eq!(presentation.entries.len(), 1);
        assert_eq!(
            presentation.entries[0].summary(),
            "Duración: 90 minutos, Precio: 10€ (Adulto)"
        );
        assert_eq!(presentation.entries[0].position, 1);
        assert_eq!(presentation.entries[0].distance_from_previous_km, None);
    }

    #[test]
    fn test_empty_presentation_uses_default_center() {
        let presentation = ResultsPresentation::from_response(&[]);
        assert_eq!(presentation.center, DEFAULT_CENTER);
        assert!(presentation.markers.is_empty());
        assert!(presentation.is_empty());
    }

    #[test]
    fn test_marker_projection_categories() {
        let mut museum = palacio_real();
        museum.categories = vec![TourismCategory::Museum, TourismCategory::Gallery];
        let presentation = ResultsPresentation::from_response(&[museum, retiro()]);
        assert_eq!(presentation.markers[0].category.as_str(), "museum");
        assert_eq!(presentation.markers[1].category.as_str(), "generic");
    }

    #[test]
    fn test_price_breakdown_and_order() {
        let presentation = ResultsPresentation::from_response(&[palacio_real(), retiro()]);
        let second = presentation.entry(2).unwrap();
        assert_eq!(second.name, "Parque del Retiro");
        assert_eq!(
            second.summary(),
            "Duración: 90 minutos, Precio: 10€ (Adulto), 5€ (Niño), 7.5€ (Senior)"
        );
        let leg = second.distance_from_previous_km.unwrap();
        assert!(leg > 1.0 && leg < 2.0, "got {leg}");
        assert!(presentation.entry(0).is_none());
        assert!(presentation.entry(3).is_none());
    }

    #[test]
    fn test_zero_reduced_prices_are_omitted() {
        let mut attraction = palacio_real();
        attraction.price.child = Some(0.0);
        attraction.price.senior = Some(4.0);
        assert_eq!(
            format_price(&attraction.price),
            "10€ (Adulto), 4€ (Senior)"
        );

        attraction.price.adult = 0.0;
        attraction.price.senior = Some(0.0);
        assert_eq!(format_price(&attraction.price), "0€ (Adulto)");
    }

    #[test]
    fn test_usd_symbol() {
        let mut attraction = palacio_real();
        attraction.price.currency = crate::models::Currency::Usd;
        attraction.price.adult = 12.5;
        assert_eq!(format_price(&attraction.price), "12.5$ (Adulto)");
    }

    async fn mounted(response: &[Attraction]) -> ResultsView<HeadlessSdk> {
        ResultsView::mount(&HeadlessProvider::new(), &maps_config(), "results-map", response)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_mount_shows_markers_and_fits() {
        let view = mounted(&[palacio_real(), retiro()]).await;
        assert_eq!(view.map().sdk().marker_count(), 2);
        let bounds = view.map().viewport().bounds.unwrap();
        assert!(bounds.contains(&palacio_real().location));
        assert!(bounds.contains(&retiro().location));
    }

    #[tokio::test]
    async fn test_empty_response_mounts_without_markers() {
        let view = mounted(&[]).await;
        assert_eq!(view.map().sdk().marker_count(), 0);
        assert_eq!(view.map().viewport().center, DEFAULT_CENTER);
        assert_eq!(view.map().viewport().zoom, RESULTS_ZOOM);
    }

    #[tokio::test]
    async fn test_marker_click_selects_and_refresh_restacks() {
        let mut view = mounted(&[palacio_real(), retiro()]).await;
        let sdk = view.map().sdk().clone();

        let retiro_marker = sdk.find_marker("Parque del Retiro").unwrap();
        assert_eq!(sdk.click(retiro_marker), 1);
        assert!(view.selection().is_selected("2"));

        assert!(view.refresh());
        assert!(!view.refresh());

        let restacked = sdk.find_marker("Parque del Retiro").unwrap();
        assert_eq!(
            sdk.marker_options(restacked).unwrap().z_index,
            Some(SELECTED_Z_INDEX)
        );
        let other = sdk.find_marker("Palacio Real").unwrap();
        assert_eq!(sdk.marker_options(other).unwrap().z_index, None);
        assert_eq!(sdk.marker_count(), 2);
    }

    #[tokio::test]
    async fn test_popup_stays_open_after_selection_refresh() {
        let mut view = mounted(&[palacio_real(), retiro()]).await;
        let sdk = view.map().sdk().clone();

        sdk.click(sdk.find_marker("Palacio Real").unwrap());
        assert!(sdk.opened_info_window().is_some());
        assert!(view.refresh());

        let selected = sdk.find_marker("Palacio Real").unwrap();
        let popup = sdk.opened_info_window().unwrap();
        assert_eq!(popup.anchor, Some(selected));
        assert!(popup.content.unwrap().contains("Palacio Real"));
        assert_eq!(
            sdk.marker_options(selected).unwrap().z_index,
            Some(SELECTED_Z_INDEX)
        );
    }

    #[tokio::test]
    async fn test_select_entry_emphasizes_marker() {
        let mut view = mounted(&[palacio_real(), retiro()]).await;
        let entry = view.select_entry(1).unwrap();
        assert_eq!(entry.id, "1");

        let sdk = view.map().sdk();
        let marker = sdk.find_marker("Palacio Real").unwrap();
        assert_eq!(
            sdk.marker_options(marker).unwrap().z_index,
            Some(SELECTED_Z_INDEX)
        );
        assert!(view.select_entry(9).is_none());
    }

    #[tokio::test]
    async fn test_show_replaces_itinerary() {
        let mut view = mounted(&[palacio_real()]).await;
        view.select_entry(1);

        view.show(&[retiro()]);
        assert!(view.selection().selected_id().is_none());
        assert_eq!(view.map().marker_ids(), vec!["2"]);
        assert_eq!(view.map().sdk().marker_count(), 1);
        assert_eq!(view.presentation().entries[0].name, "Parque del Retiro");

        view.show(&[]);
        assert_eq!(view.map().sdk().marker_count(), 0);
        assert_eq!(view.map().viewport().center, DEFAULT_CENTER);
    }
}
