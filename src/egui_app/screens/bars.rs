//! Bars list, a bar's events and the clustered map of the filtered bars

use super::{abandon, settle, Fetch};
use crate::egui_app::api::ApiClient;
use crate::egui_app::load::{LoadAction, LoadState};
use crate::egui_app::map::{bar_points, Cluster, MapPoint, MapView};
use crate::egui_app::tasks::Scope;
use crate::shared::models::{Bar, BarEvent};

#[derive(Default)]
pub struct BarsScreen {
    scope: Scope,
    bars: LoadState<Vec<Bar>>,
    pending_bars: Fetch<Vec<Bar>>,
    pub filter_text: String,
    selected: Option<i64>,
    events: LoadState<Vec<BarEvent>>,
    pending_events: Fetch<Vec<BarEvent>>,
    map: MapView,
}

impl BarsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the bar list unless it is already loaded or loading
    pub fn load(&mut self, api: &ApiClient) {
        if matches!(self.bars, LoadState::Loaded(_) | LoadState::Loading) {
            return;
        }
        self.bars.dispatch(LoadAction::Start);
        let api = api.clone();
        self.pending_bars = Some(self.scope.spawn(async move { api.get_bars().await }));
    }

    pub fn reload(&mut self, api: &ApiClient) {
        self.bars.dispatch(LoadAction::Reset);
        self.pending_bars = None;
        self.load(api);
    }

    pub fn select(&mut self, api: &ApiClient, bar_id: i64) {
        if self.selected == Some(bar_id) && !self.events.is_loading() {
            return;
        }
        self.selected = Some(bar_id);
        self.events.dispatch(LoadAction::Start);
        let api = api.clone();
        // Replacing the slot drops the receiver of any previous selection.
        self.pending_events = Some(self.scope.spawn(async move { api.get_bar_events(bar_id).await }));
    }

    pub fn poll(&mut self) {
        settle(&mut self.bars, &mut self.pending_bars, "bars");
        settle(&mut self.events, &mut self.pending_events, "bar events");
    }

    pub fn unmount(&mut self) {
        self.scope.invalidate();
        abandon(&mut self.bars, &mut self.pending_bars);
        abandon(&mut self.events, &mut self.pending_events);
    }

    pub fn bars(&self) -> &LoadState<Vec<Bar>> {
        &self.bars
    }

    /// Bars passing the filter, in server order
    pub fn visible_bars(&self) -> Vec<&Bar> {
        match self.bars.data() {
            Some(bars) => bars.iter().filter(|b| b.matches(&self.filter_text)).collect(),
            None => Vec::new(),
        }
    }

    pub fn selected(&self) -> Option<&Bar> {
        let id = self.selected?;
        self.bars.data()?.iter().find(|b| b.id == id)
    }

    pub fn events(&self) -> &LoadState<Vec<BarEvent>> {
        &self.events
    }

    pub fn map_points(&self) -> Vec<MapPoint> {
        bar_points(self.visible_bars())
    }

    /// Clusters of the filtered bars; recomputed when the filter or zoom moved
    pub fn clusters(&mut self) -> Vec<Cluster> {
        let points = self.map_points();
        self.map.clusters(&points).to_vec()
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MapView {
        &mut self.map
    }
}
