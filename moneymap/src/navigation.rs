//! Routes, locations and the guards that decide what a visitor may see.

use moneymap_auth::SessionSnapshot;
use std::fmt;
use url::form_urlencoded;

/// Query parameter carrying the page to return to after signing in
pub const REDIRECT_PARAM: &str = "redirect";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Dashboard,
    Transactions,
    Settings,
    Login,
    Register,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Home,
        Route::Dashboard,
        Route::Transactions,
        Route::Settings,
        Route::Login,
        Route::Register,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Dashboard => "/dashboard",
            Route::Transactions => "/transactions",
            Route::Settings => "/settings",
            Route::Login => "/login",
            Route::Register => "/register",
        }
    }

    /// Exact path match; a single trailing slash is tolerated
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(stripped) => stripped,
        };
        Self::ALL.into_iter().find(|route| route.path() == trimmed)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Dashboard => "Dashboard",
            Route::Transactions => "Transactions",
            Route::Settings => "Settings",
            Route::Login => "Sign in",
            Route::Register => "Sign up",
        }
    }

    /// Requires a signed-in user
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Transactions | Route::Settings)
    }

    /// Only makes sense for anonymous visitors
    pub fn is_guest_only(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

/// A path plus optional query string, e.g. `/login?redirect=%2Fsettings`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Option<String>,
}

impl Location {
    /// Parse a path as typed or linked. Fragments are dropped and a missing
    /// leading slash is added.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let input = input.split('#').next().unwrap_or_default();
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (input, None),
        };

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Self {
            path,
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
        }
    }

    pub fn root() -> Self {
        Self::for_route(Route::Home)
    }

    pub fn for_route(route: Route) -> Self {
        Self {
            path: route.path().to_string(),
            query: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn route(&self) -> Option<Route> {
        Route::from_path(&self.path)
    }

    /// First value of a decoded query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.query {
            Some(query) => write!(f, "{}?{}", self.path, query),
            None => f.write_str(&self.path),
        }
    }
}

impl From<Route> for Location {
    fn from(route: Route) -> Self {
        Self::for_route(route)
    }
}

/// What to do with a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Render(Route),
    Redirect(Location),
    /// The session is still being restored
    Wait,
}

pub fn guard(location: &Location, session: &SessionSnapshot) -> GuardOutcome {
    let Some(route) = location.route() else {
        return GuardOutcome::Redirect(Location::root());
    };

    if route.is_protected() {
        if session.is_loading {
            return GuardOutcome::Wait;
        }
        if !session.is_authenticated() {
            return GuardOutcome::Redirect(login_redirect(location));
        }
    } else if route.is_guest_only() && session.is_authenticated() {
        return GuardOutcome::Redirect(Location::for_route(Route::Dashboard));
    }

    GuardOutcome::Render(route)
}

/// The sign-in page, remembering where the visitor was headed
pub fn login_redirect(from: &Location) -> Location {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(REDIRECT_PARAM, &from.to_string())
        .finish();

    Location {
        path: Route::Login.path().to_string(),
        query: Some(query),
    }
}

/// Where to go once signed in: the `redirect` parameter of the sign-in page
/// when it names a local path, otherwise the dashboard
pub fn post_login_target(login_page: &Location) -> Location {
    login_page
        .query_param(REDIRECT_PARAM)
        .filter(|target| is_local_path(target))
        .map(|target| Location::parse(&target))
        .unwrap_or_else(|| Location::for_route(Route::Dashboard))
}

fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.starts_with("/\\")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Go(Route),
    SignOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
}

const SIGNED_IN_MENU: [MenuItem; 4] = [
    MenuItem {
        label: "Dashboard",
        action: MenuAction::Go(Route::Dashboard),
    },
    MenuItem {
        label: "Transactions",
        action: MenuAction::Go(Route::Transactions),
    },
    MenuItem {
        label: "Settings",
        action: MenuAction::Go(Route::Settings),
    },
    MenuItem {
        label: "Sign out",
        action: MenuAction::SignOut,
    },
];

const ANONYMOUS_MENU: [MenuItem; 3] = [
    MenuItem {
        label: "Home",
        action: MenuAction::Go(Route::Home),
    },
    MenuItem {
        label: "Sign in",
        action: MenuAction::Go(Route::Login),
    },
    MenuItem {
        label: "Sign up",
        action: MenuAction::Go(Route::Register),
    },
];

/// Navbar entries for the current visitor
pub fn menu(is_authenticated: bool) -> &'static [MenuItem] {
    if is_authenticated {
        &SIGNED_IN_MENU
    } else {
        &ANONYMOUS_MENU
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneymap_auth::User;

    fn loading() -> SessionSnapshot {
        SessionSnapshot {
            user: None,
            is_loading: true,
        }
    }

    fn anonymous() -> SessionSnapshot {
        SessionSnapshot {
            user: None,
            is_loading: false,
        }
    }

    fn signed_in() -> SessionSnapshot {
        SessionSnapshot {
            user: Some(User::synthetic("jane@example.com", "jane")),
            is_loading: false,
        }
    }

    #[test]
    fn parse_splits_path_and_query() {
        let location = Location::parse("/login?redirect=%2Fsettings#top");
        assert_eq!(location.path(), "/login");
        assert_eq!(location.query(), Some("redirect=%2Fsettings"));
        assert_eq!(location.query_param("redirect").as_deref(), Some("/settings"));
        assert_eq!(Location::parse("dashboard").path(), "/dashboard");
        assert_eq!(Location::parse("/?").query(), None);
    }

    #[test]
    fn unknown_paths_fall_back_to_home() {
        assert_eq!(
            guard(&Location::parse("/nowhere"), &signed_in()),
            GuardOutcome::Redirect(Location::root())
        );
        assert_eq!(Route::from_path("/settings/"), Some(Route::Settings));
        assert_eq!(Route::from_path("/"), Some(Route::Home));
    }

    #[test]
    fn protected_routes_wait_while_loading() {
        for route in [Route::Dashboard, Route::Transactions, Route::Settings] {
            assert_eq!(guard(&route.into(), &loading()), GuardOutcome::Wait);
        }
        assert_eq!(
            guard(&Route::Home.into(), &loading()),
            GuardOutcome::Render(Route::Home)
        );
        assert_eq!(
            guard(&Route::Login.into(), &loading()),
            GuardOutcome::Render(Route::Login)
        );
    }

    #[test]
    fn anonymous_visitor_is_sent_to_login_with_return_path() {
        let target = Location::parse("/transactions?sort=date");
        let GuardOutcome::Redirect(login) = guard(&target, &anonymous()) else {
            panic!("expected redirect");
        };

        assert_eq!(login.route(), Some(Route::Login));
        assert_eq!(login.query(), Some("redirect=%2Ftransactions%3Fsort%3Ddate"));
        assert_eq!(post_login_target(&login), target);
    }

    #[test]
    fn signed_in_visitor_skips_guest_pages() {
        for route in [Route::Login, Route::Register] {
            assert_eq!(
                guard(&route.into(), &signed_in()),
                GuardOutcome::Redirect(Location::for_route(Route::Dashboard))
            );
        }
        assert_eq!(
            guard(&Route::Settings.into(), &signed_in()),
            GuardOutcome::Render(Route::Settings)
        );
    }

    #[test]
    fn post_login_target_defaults_and_rejects_foreign_urls() {
        assert_eq!(
            post_login_target(&Location::for_route(Route::Login)),
            Location::for_route(Route::Dashboard)
        );
        for bad in [
            "/login?redirect=https%3A%2F%2Fevil.example",
            "/login?redirect=%2F%2Fevil.example",
            "/login?redirect=settings",
        ] {
            assert_eq!(
                post_login_target(&Location::parse(bad)),
                Location::for_route(Route::Dashboard)
            );
        }
    }

    #[test]
    fn menu_depends_on_session() {
        let labels: Vec<_> = menu(true).iter().map(|item| item.label).collect();
        assert_eq!(labels, ["Dashboard", "Transactions", "Settings", "Sign out"]);

        let labels: Vec<_> = menu(false).iter().map(|item| item.label).collect();
        assert_eq!(labels, ["Home", "Sign in", "Sign up"]);
    }
}
