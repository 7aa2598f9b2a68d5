//! Views of the application and the session guard in front of them.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Attendance,
    ScanQr,
    CreateQr,
    NotFound,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Attendance => "/attendance",
            Route::ScanQr => "/scan-qr",
            Route::CreateQr => "/qr/create",
            Route::NotFound => "*",
        }
    }

    pub fn from_path(path: &str) -> Route {
        match path {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/" | "/dashboard" => Route::Dashboard,
            "/attendance" => Route::Attendance,
            "/scan-qr" => Route::ScanQr,
            "/qr/create" => Route::CreateQr,
            _ => Route::NotFound,
        }
    }

    /// Only reachable with a session.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Attendance | Route::ScanQr | Route::CreateQr
        )
    }

    /// Only reachable without a session.
    pub fn is_guest(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Where the user actually lands when asking for `route`.
pub fn guard(route: Route, authenticated: bool) -> Route {
    if route.is_protected() && !authenticated {
        Route::Login
    } else if route.is_guest() && authenticated {
        Route::Dashboard
    } else {
        route
    }
}
