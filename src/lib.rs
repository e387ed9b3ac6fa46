//! route-planner
//!
//! Orders a courier's deliveries for a day into a short open path from the
//! warehouse, and keeps the latest result for display.

pub mod builder;
pub mod config;
pub mod depot;
pub mod dispatch;
pub mod error;
pub mod haversine;
pub mod matrix;
pub mod osrm;
pub mod polyline;
pub mod route;
pub mod session;
pub mod solver;
pub mod traits;

pub use builder::{BuildOptions, CancelToken, RouteBuilder, build_route};
pub use dispatch::{Dispatcher, OptimizeRequest};
pub use error::{BuildError, DispatchError, InvalidMatrixError, ProviderError, RouteNotFound};
pub use matrix::DistanceMatrix;
pub use route::{Route, RouteStop, RouteSummary};
pub use session::{RouteSessionStore, SessionConfig, SessionKeying};
pub use solver::{SolveOptions, solve};
