use log::info;

use crate::error::{MapError, Result};
use crate::geometry::Projection;
use crate::models::{StationId, SubwayNetwork};
use crate::services::{self, CentralityMetric, Compass, NetworkSummary};
use crate::settings::{MapSettings, MapStyle};
use crate::store::GraphStore;
use super::base_map::{self, BaseMap};
use super::canvas::{Canvas, Element, ElementId};
use super::hotkeys::MapAction;
use super::view_state::{ViewState, ZoomDirection};

/// User input, in screen coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64, shift: bool },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    Action(MapAction),
    /// Select a station by name, as if it had been shift-clicked
    FindStation(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// Keep going and tell the user something
    Notice(String),
    Quit,
}

/// Owns the map: the store handle, the canvas, the loaded network and the
/// view state. Events are handled one at a time.
pub struct MapController<S, C> {
    store: S,
    canvas: C,
    style: MapStyle,
    network: SubwayNetwork,
    base: BaseMap,
    state: ViewState,
    path_elements: Vec<ElementId>,
    centrality_elements: Vec<ElementId>,
}

impl<S: GraphStore, C: Canvas> MapController<S, C> {
    /// Load the network and draw the base map.
    ///
    /// # Errors
    ///
    /// Fails if the network cannot be loaded or its geometry is degenerate;
    /// nothing is drawn in that case.
    pub async fn start(store: S, mut canvas: C, settings: &MapSettings) -> Result<Self> {
        let mut network = services::load_network(&store).await?;
        let extents = services::load_extents(&store, &network, settings.extent_source).await?;

        let projection = Projection::fit_width(extents, canvas.size().0)?;
        network.project(&projection)?;

        let plan = base_map::plan(&network, &projection, &settings.style)?;
        info!("Drawing {} base map elements", plan.element_count());
        let base = BaseMap::draw(&mut canvas, plan);

        Ok(Self {
            store,
            canvas,
            style: settings.style.clone(),
            network,
            base,
            state: ViewState::default(),
            path_elements: Vec::new(),
            centrality_elements: Vec::new(),
        })
    }

    #[must_use]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn network(&self) -> &SubwayNetwork {
        &self.network
    }

    #[must_use]
    pub fn base(&self) -> &BaseMap {
        &self.base
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one event. On error the view is left as it was before the event.
    ///
    /// # Errors
    ///
    /// Returns the error of the failed query or drawing step.
    pub async fn handle(&mut self, event: InputEvent) -> Result<Control> {
        match event {
            InputEvent::PointerDown { x, y, shift } => {
                if shift {
                    if let Some(station) = self.station_at((x, y)) {
                        self.select_station(station).await?;
                        return Ok(Control::Continue);
                    }
                }
                self.state = self.state.with_drag_start((x, y));
            }
            InputEvent::PointerMove { x, y } => {
                if self.state.is_panning() {
                    self.commit_pan(self.state.with_drag_move((x, y)));
                }
            }
            InputEvent::PointerUp { x, y } => {
                if self.state.is_panning() {
                    self.commit_pan(self.state.with_drag_end((x, y)));
                }
            }
            InputEvent::Action(action) => return self.run_action(action).await,
            InputEvent::FindStation(name) => self.find_station(&name).await?,
        }
        Ok(Control::Continue)
    }

    async fn run_action(&mut self, action: MapAction) -> Result<Control> {
        match action {
            MapAction::ZoomIn => self.zoom(ZoomDirection::In),
            MapAction::ZoomOut => self.zoom(ZoomDirection::Out),
            MapAction::TunnelKCore => self.toggle_centrality(CentralityMetric::TunnelKCore).await?,
            MapAction::RouteKCore => self.toggle_centrality(CentralityMetric::RouteKCore).await?,
            MapAction::ClearPath => self.clear_path(),
            MapAction::ClearAll => self.clear_all(),
            MapAction::NetworkFacts => return Ok(Control::Notice(self.network_facts().await?)),
            MapAction::Quit => {
                info!("Quitting");
                return Ok(Control::Quit);
            }
        }
        Ok(Control::Continue)
    }

    fn station_at(&self, screen: (f64, f64)) -> Option<StationId> {
        self.canvas
            .elements_at(screen)
            .into_iter()
            .find_map(|element| self.base.station_for_element(element))
            .cloned()
    }

    fn commit_pan(&mut self, state: ViewState) {
        self.canvas.pan_to(state.offset);
        self.state = state;
    }

    fn zoom(&mut self, direction: ZoomDirection) {
        if self.state.is_panning() {
            info!("Currently panning, release the pointer to zoom");
            return;
        }

        let (width, height) = self.canvas.size();
        let factor = direction.factor();
        let state = self.state.with_zoom(factor, (width / 2.0, height / 2.0));

        self.canvas.scale(factor);
        self.canvas.pan_to(state.offset);
        self.state = state;
    }

    fn scaled(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x * self.state.scale, y * self.state.scale)
    }

    /// Add a station to the selection and, from the second one on, draw the
    /// path from the previously selected station.
    ///
    /// # Errors
    ///
    /// Returns `NoPathFound` or `Transport` from the path query; the station
    /// is not added to the selection then.
    pub async fn select_station(&mut self, station: StationId) -> Result<()> {
        let handles = self
            .base
            .station(&station)
            .ok_or_else(|| MapError::UnknownStation(station.to_string()))?;
        let position = self
            .network
            .station(&station)
            .map(|s| s.canvas)
            .ok_or_else(|| MapError::UnknownStation(station.to_string()))?;

        let state = self.state.with_selected(station);

        let segments = match state.last_leg() {
            Some((from, to)) => {
                let path = services::shortest_path(&self.store, from, to)
                    .await
                    .map_err(|e| self.with_station_names(e))?;
                info!("Itinerary:\n{}", services::describe_path(&self.network, &path));
                services::path_segments(&self.network, &path, state.scale)?
            }
            None => Vec::new(),
        };

        let highlight = Element::circle(self.scaled(position), 2.0 * self.style.station_radius * state.scale)
            .fill(&self.style.selection_color);
        let highlight = self.canvas.create(highlight);
        self.canvas.lower_below(highlight, handles.label);
        self.path_elements.push(highlight);

        for (from, to) in segments {
            let line = Element::line(from, to).stroke(&self.style.path_color, self.style.line_width);
            let line = self.canvas.create(line);
            if let Some(layer) = self.base.station_layer() {
                self.canvas.lower_below(line, layer);
            }
            self.path_elements.push(line);
        }

        self.state = state;
        Ok(())
    }

    /// `NoPathFound` carries ids from the store; users know stations by name
    fn with_station_names(&self, error: MapError) -> MapError {
        let name = |raw: String| {
            self.network
                .station(&StationId::new(raw.as_str()))
                .map_or(raw, |station| station.name.clone())
        };
        match error {
            MapError::NoPathFound { from, to } => MapError::NoPathFound { from: name(from), to: name(to) },
            other => other,
        }
    }

    /// Select the station whose name best matches what the user typed
    async fn find_station(&mut self, query: &str) -> Result<()> {
        let name = services::best_match(&self.network, query)
            .map(|station| station.name.clone())
            .ok_or_else(|| MapError::UnknownStation(query.to_string()))?;
        if name != query {
            info!("{query:?} taken as {name:?}");
        }

        let station = self
            .store
            .station_by_name(&name)
            .await?
            .filter(|id| self.network.contains_station(id))
            .ok_or(MapError::UnknownStation(name))?;
        self.select_station(station).await
    }

    async fn network_facts(&self) -> Result<String> {
        let summary = NetworkSummary::of(&self.network);
        let north = services::extremal_station(&self.store, &self.network, Compass::North).await?;
        Ok(match north {
            Some(station) => format!("{summary}. Northernmost: {} ({})", station.name, station.line_labels()),
            None => summary.to_string(),
        })
    }

    /// Show a centrality overlay; asking for the one already shown hides it,
    /// asking for another replaces it.
    ///
    /// # Errors
    ///
    /// Returns `EmptyResult` or `Transport` from the query, or
    /// `StationNotOnMap` if the result names stations not on the map.
    pub async fn toggle_centrality(&mut self, metric: CentralityMetric) -> Result<()> {
        if self.state.centrality == Some(metric) {
            self.hide_centrality();
            return Ok(());
        }

        let result = services::compute_centrality(&self.store, metric).await?;
        result.ensure_members_in(&self.network)?;

        let (max_radius, color) = match metric {
            CentralityMetric::TunnelKCore => (self.style.tunnel_kcore_max_radius, &self.style.tunnel_kcore_color),
            CentralityMetric::RouteKCore => (self.style.route_kcore_max_radius, &self.style.route_kcore_color),
        };

        let mut circles = Vec::with_capacity(result.member_count());
        for group in &result.groups {
            let radius = result.radius_for(group.score, max_radius) * self.state.scale;
            for member in &group.members {
                let Some(station) = self.network.station(member) else { continue };
                let anchor = self.base.station(member).map(|h| h.label).or(self.base.station_layer());
                circles.push((Element::circle(self.scaled(station.canvas), radius).fill(color), anchor));
            }
        }

        self.hide_centrality();
        for (circle, anchor) in circles {
            let id = self.canvas.create(circle);
            if let Some(anchor) = anchor {
                self.canvas.lower_below(id, anchor);
            }
            self.centrality_elements.push(id);
        }

        self.state = self.state.with_centrality(Some(metric));
        Ok(())
    }

    fn hide_centrality(&mut self) {
        for id in self.centrality_elements.drain(..) {
            self.canvas.delete(id);
        }
        self.state = self.state.with_centrality(None);
    }

    pub fn clear_path(&mut self) {
        for id in self.path_elements.drain(..) {
            self.canvas.delete(id);
        }
        self.state = self.state.with_cleared_path();
    }

    pub fn clear_all(&mut self) {
        self.clear_path();
        self.hide_centrality();
    }
}
