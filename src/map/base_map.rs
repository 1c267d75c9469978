//! The static part of the map: river, tunnels, stations and their labels.

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::geometry::{segment_offset, Projection};
use crate::models::{StationId, SubwayNetwork};
use crate::settings::MapStyle;
use super::canvas::{Canvas, Element, ElementId};
use super::river::project_river;

struct PlannedStation {
    /// Every station id drawn by this marker; stations sharing a name share a marker
    ids: Vec<StationId>,
    label: Element,
    marker: Element,
}

/// Base map geometry, computed up front so nothing is drawn if any of it fails
pub struct BasePlan {
    river: Element,
    tunnels: Vec<Element>,
    stations: Vec<PlannedStation>,
}

impl BasePlan {
    #[must_use]
    pub fn element_count(&self) -> usize {
        1 + self.tunnels.len() + 2 * self.stations.len()
    }
}

/// Compute every base map element from the network's canvas positions.
///
/// The i-th line sharing a tunnel is displaced by `i * line_spacing`
/// perpendicular to the tunnel.
///
/// # Errors
///
/// Returns `DegenerateGeometry` if the projection is empty or a tunnel shared
/// by several lines has zero length.
pub fn plan(network: &SubwayNetwork, projection: &Projection, style: &MapStyle) -> Result<BasePlan> {
    let river = Element::polyline(project_river(projection)?).stroke(&style.seine_color, style.seine_width);

    let mut tunnels = Vec::new();
    for ((a, b), lines) in network.tunnels_by_pair() {
        let (Some(from), Some(to)) = (network.station(&a), network.station(&b)) else {
            continue;
        };
        let (from, to) = (from.canvas, to.canvas);

        let (dx, dy) = if lines.len() > 1 {
            segment_offset(from, to, style.line_spacing)?
        } else {
            (0.0, 0.0)
        };

        for (i, line) in lines.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let i = i as f64;
            tunnels.push(
                Element::line((from.0 - i * dx, from.1 + i * dy), (to.0 - i * dx, to.1 + i * dy))
                    .stroke(line.color(), style.line_width),
            );
        }
    }

    let mut by_name: IndexMap<&str, PlannedStation> = IndexMap::new();
    for station in network.stations() {
        if let Some(planned) = by_name.get_mut(station.name.as_str()) {
            planned.ids.push(station.id.clone());
            continue;
        }
        let (x, y) = station.canvas;
        let r = style.station_radius;
        by_name.insert(
            &station.name,
            PlannedStation {
                ids: vec![station.id.clone()],
                label: Element::text((x + r, y + r), station.name.clone(), style.station_font_size)
                    .fill(&style.label_color),
                marker: Element::circle((x, y), r)
                    .fill(&style.station_fill)
                    .stroke(&style.station_outline, 1.0),
            },
        );
    }

    Ok(BasePlan {
        river,
        tunnels,
        stations: by_name.into_values().collect(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationHandles {
    pub marker: ElementId,
    pub label: ElementId,
}

/// Handles of the drawn base map
#[derive(Debug, Clone, Default)]
pub struct BaseMap {
    river: Option<ElementId>,
    tunnels: Vec<ElementId>,
    stations: HashMap<StationId, StationHandles>,
    element_to_station: HashMap<ElementId, StationId>,
    /// Bottom-most element of the station layer
    station_layer: Option<ElementId>,
}

impl BaseMap {
    /// Emit a plan onto the canvas, bottom layer first
    pub fn draw<C: Canvas>(canvas: &mut C, plan: BasePlan) -> Self {
        let mut base = Self {
            river: Some(canvas.create(plan.river)),
            ..Self::default()
        };

        base.tunnels = plan.tunnels.into_iter().map(|tunnel| canvas.create(tunnel)).collect();

        for station in plan.stations {
            let handles = StationHandles {
                label: canvas.create(station.label),
                marker: canvas.create(station.marker),
            };
            base.station_layer.get_or_insert(handles.label);

            if let Some(first) = station.ids.first() {
                base.element_to_station.insert(handles.marker, first.clone());
                base.element_to_station.insert(handles.label, first.clone());
            }
            for id in station.ids {
                base.stations.insert(id, handles);
            }
        }

        base
    }

    /// The station a clicked marker or label stands for
    #[must_use]
    pub fn station_for_element(&self, element: ElementId) -> Option<&StationId> {
        self.element_to_station.get(&element)
    }

    #[must_use]
    pub fn station(&self, id: &StationId) -> Option<StationHandles> {
        self.stations.get(id).copied()
    }

    /// Overlays lowered below this element sit under every station but above the tunnels
    #[must_use]
    pub fn station_layer(&self) -> Option<ElementId> {
        self.station_layer
    }

    #[must_use]
    pub fn tunnel_count(&self) -> usize {
        self.tunnels.len()
    }

    #[must_use]
    pub fn handles(&self) -> HashSet<ElementId> {
        self.river
            .into_iter()
            .chain(self.tunnels.iter().copied())
            .chain(self.element_to_station.keys().copied())
            .collect()
    }
}
