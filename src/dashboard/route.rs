//! URL path routing between the two dashboard pages.

use serde::{Deserialize, Serialize};

pub const OVERVIEW_PATH: &str = "/";
pub const TRUST_DATA_PATH: &str = "/trustData";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Route {
    /// Default page, served for every path except `/trustData`.
    #[default]
    Overview,
    TrustData,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Overview, Route::TrustData];

    /// Resolve a request path. Query strings, fragments and a trailing slash are ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let path = path.trim_end_matches('/');

        if path == TRUST_DATA_PATH {
            Route::TrustData
        } else {
            Route::Overview
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Overview => OVERVIEW_PATH,
            Route::TrustData => TRUST_DATA_PATH,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Overview => "Developer salary analysis 2024",
            Route::TrustData => "Developer salary analysis 2024 - trusted data",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trust_data_path_resolves() {
        assert_eq!(Route::from_path("/trustData"), Route::TrustData);
        assert_eq!(Route::from_path("/trustData/"), Route::TrustData);
        assert_eq!(Route::from_path("/trustData?x=1"), Route::TrustData);
    }

    #[test]
    fn everything_else_is_overview() {
        for path in ["/", "", "/trustdata", "/other", "/trustData/extra"] {
            assert_eq!(Route::from_path(path), Route::Overview, "path {:?}", path);
        }
    }

    #[test]
    fn path_round_trips_for_canonical_routes() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }
}
