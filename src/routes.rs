//! Client route table and access guard

use std::fmt;

/// A client-visible page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    GetAppSoon,
    Signup,
    Login,
    ForgotPassword,
    Profile,
}

impl Route {
    /// Every route, in navigation order
    pub const ALL: [Route; 6] = [
        Route::Home,
        Route::GetAppSoon,
        Route::Signup,
        Route::Login,
        Route::ForgotPassword,
        Route::Profile,
    ];

    /// Resolve a path to a route
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::GetAppSoon => "/getappsoon",
            Self::Signup => "/signup",
            Self::Login => "/login",
            Self::ForgotPassword => "/forgot-password",
            Self::Profile => "/profile",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::GetAppSoon => "Get the app (coming soon)",
            Self::Signup => "Sign up",
            Self::Login => "Log in",
            Self::ForgotPassword => "Forgot password",
            Self::Profile => "Profile",
        }
    }

    /// Only reachable with an access credential
    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Profile)
    }

    /// Auth screens render without the navigation bar
    pub fn shows_navbar(self) -> bool {
        !matches!(self, Self::Login | Self::Signup | Self::ForgotPassword)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What happens when a route is visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// Decide whether `route` renders for a session that is (or is not)
/// authenticated. Protected routes send anonymous visitors to `/login`.
pub fn guard(route: Route, authenticated: bool) -> Navigation {
    if route.requires_auth() && !authenticated {
        Navigation::Redirect(Route::Login)
    } else {
        Navigation::Render(route)
    }
}
