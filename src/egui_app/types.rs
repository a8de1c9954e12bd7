//! App-level view enum

/// Which screen the central panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    /// Login form
    Auth,
    /// Live social feed
    Feed,
    /// Bar list with the selected bar's events
    Bars,
    /// Clustered map of the filtered bars
    Map,
    /// Beer list, detail and review form
    Beers,
    /// One event: attendance, attendees, pictures
    Event,
    /// User directory and friendships
    Users,
}

impl AppView {
    /// Tabs shown in the top bar, in order
    pub const TABS: [AppView; 5] = [AppView::Feed, AppView::Bars, AppView::Map, AppView::Beers, AppView::Users];

    pub fn title(self) -> &'static str {
        match self {
            AppView::Auth => "Log in",
            AppView::Feed => "Feed",
            AppView::Bars => "Bars",
            AppView::Map => "Map",
            AppView::Beers => "Beers",
            AppView::Event => "Event",
            AppView::Users => "People",
        }
    }
}
