use crate::models::StationId;
use crate::services::CentralityMetric;

pub const ZOOM_IN_FACTOR: f64 = 2.0;
pub const ZOOM_OUT_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::In => ZOOM_IN_FACTOR,
            Self::Out => ZOOM_OUT_FACTOR,
        }
    }
}

/// An in-progress pan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// Pointer position when the drag started
    pub anchor: (f64, f64),
    /// View offset when the drag started
    pub start_offset: (f64, f64),
}

/// Everything about the view that changes in response to input.
///
/// Handlers derive a new state with the `with_*` methods and only commit it
/// once the matching canvas update succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Cumulative zoom factor
    pub scale: f64,
    /// Screen translation of the whole drawing
    pub offset: (f64, f64),
    pub drag: Option<Drag>,
    /// Stations picked by the user, oldest first
    pub selection: Vec<StationId>,
    /// Centrality overlay currently shown
    pub centrality: Option<CentralityMetric>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: (0.0, 0.0),
            drag: None,
            selection: Vec::new(),
            centrality: None,
        }
    }
}

impl ViewState {
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.drag.is_some()
    }

    /// Zoom by `factor` keeping the screen point `centre` fixed
    #[must_use]
    pub fn with_zoom(&self, factor: f64, centre: (f64, f64)) -> Self {
        let (cx, cy) = centre;
        Self {
            scale: self.scale * factor,
            offset: (
                cx + factor * (self.offset.0 - cx),
                cy + factor * (self.offset.1 - cy),
            ),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_drag_start(&self, pointer: (f64, f64)) -> Self {
        Self {
            drag: Some(Drag { anchor: pointer, start_offset: self.offset }),
            ..self.clone()
        }
    }

    /// Follow the pointer; without an active drag nothing changes
    #[must_use]
    pub fn with_drag_move(&self, pointer: (f64, f64)) -> Self {
        let Some(drag) = self.drag else {
            return self.clone();
        };
        Self {
            offset: (
                drag.start_offset.0 + pointer.0 - drag.anchor.0,
                drag.start_offset.1 + pointer.1 - drag.anchor.1,
            ),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_drag_end(&self, pointer: (f64, f64)) -> Self {
        Self { drag: None, ..self.with_drag_move(pointer) }
    }

    #[must_use]
    pub fn with_selected(&self, station: StationId) -> Self {
        let mut selection = self.selection.clone();
        selection.push(station);
        Self { selection, ..self.clone() }
    }

    /// The two most recent selections, once there are at least two
    #[must_use]
    pub fn last_leg(&self) -> Option<(&StationId, &StationId)> {
        match self.selection.as_slice() {
            [.., from, to] => Some((from, to)),
            _ => None,
        }
    }

    #[must_use]
    pub fn with_cleared_path(&self) -> Self {
        Self { selection: Vec::new(), ..self.clone() }
    }

    #[must_use]
    pub fn with_centrality(&self, centrality: Option<CentralityMetric>) -> Self {
        Self { centrality, ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_in_then_out_restores_view() {
        let state = ViewState { offset: (-35.0, 12.5), ..ViewState::default() };
        let centre = (600.0, 200.0);

        let back = state
            .with_zoom(ZoomDirection::In.factor(), centre)
            .with_zoom(ZoomDirection::Out.factor(), centre);

        assert_eq!(back.scale, state.scale);
        assert_eq!(back.offset, state.offset);
    }

    #[test]
    fn test_zoom_keeps_centre_fixed() {
        let state = ViewState { offset: (10.0, 20.0), ..ViewState::default() };
        let centre = (100.0, 50.0);
        let world = (centre.0 - state.offset.0, centre.1 - state.offset.1);

        let zoomed = state.with_zoom(2.0, centre);
        assert_eq!(zoomed.scale, 2.0);
        assert_eq!(
            (world.0 * 2.0 + zoomed.offset.0, world.1 * 2.0 + zoomed.offset.1),
            centre
        );
    }

    #[test]
    fn test_drag_accumulates_into_offset() {
        let state = ViewState { offset: (5.0, 5.0), ..ViewState::default() };
        let dragging = state.with_drag_start((100.0, 100.0)).with_drag_move((110.0, 90.0));
        assert!(dragging.is_panning());
        assert_eq!(dragging.offset, (15.0, -5.0));

        let done = dragging.with_drag_end((120.0, 100.0));
        assert!(!done.is_panning());
        assert_eq!(done.offset, (25.0, 5.0));

        let next = done.with_drag_start((0.0, 0.0)).with_drag_end((1.0, 1.0));
        assert_eq!(next.offset, (26.0, 6.0));
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let state = ViewState::default();
        assert_eq!(state.with_drag_move((50.0, 50.0)), state);
    }

    #[test]
    fn test_last_leg() {
        let state = ViewState::default().with_selected("A".into());
        assert_eq!(state.last_leg(), None);

        let state = state.with_selected("B".into()).with_selected("C".into());
        assert_eq!(state.last_leg(), Some((&StationId::new("B"), &StationId::new("C"))));
        assert!(state.with_cleared_path().selection.is_empty());
    }
}
