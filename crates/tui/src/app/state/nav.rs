#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Advertisements,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Dashboard, Route::Advertisements];

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Advertisements => "/advertisements",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Advertisements => "Advertisements",
        }
    }

    /// Exact path match; a single trailing slash is tolerated.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarItem {
    CreateAdvertisement,
    Page(Route),
}

impl SidebarItem {
    pub const ALL: [SidebarItem; 3] = [
        SidebarItem::CreateAdvertisement,
        SidebarItem::Page(Route::Dashboard),
        SidebarItem::Page(Route::Advertisements),
    ];

    pub fn label(self) -> &'static str {
        match self {
            SidebarItem::CreateAdvertisement => "+ Create Advertisement",
            SidebarItem::Page(route) => route.title(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLineMode {
    Info,
    Help,
}
