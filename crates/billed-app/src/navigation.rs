use std::fmt;
use std::sync::Mutex;

/// The routes the controllers can move between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Bills,
    NewBill,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Bills => "Mes notes de frais",
            Route::NewBill => "Envoyer une note de frais",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Dispatches a route change. The rendering layer supplies the
/// production implementation; tests use `RecordingNavigator`.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// A navigator that records every dispatched route for inspection.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes.lock().unwrap().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}
