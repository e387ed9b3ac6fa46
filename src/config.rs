//! Planner configuration.
//!
//! Every section has defaults, so a host application can deserialize a
//! partial document from whatever format it already uses.

use std::hash::Hash;

use serde::Deserialize;

use crate::builder::BuildOptions;
use crate::dispatch::Dispatcher;
use crate::osrm::{OsrmClient, OsrmConfig};
use crate::session::{RouteSessionStore, SessionConfig};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub osrm: OsrmConfig,
    pub build: BuildOptions,
    pub session: SessionConfig,
}

impl PlannerConfig {
    /// Defaults with the OSRM section taken from the environment.
    pub fn from_env() -> Self {
        Self {
            osrm: OsrmConfig::from_env(),
            ..Self::default()
        }
    }

    /// A dispatcher backed by OSRM for both the matrix and the geometry.
    pub fn osrm_dispatcher<C, Id>(&self) -> Result<Dispatcher<OsrmClient, C, Id>, reqwest::Error>
    where
        C: Clone + Eq + Hash + std::fmt::Debug,
        Id: Clone,
    {
        let client = OsrmClient::new(self.osrm.clone())?;
        let sessions = RouteSessionStore::new(self.session.clone());
        Ok(Dispatcher::new(client.clone(), self.build.clone(), sessions).with_geometry(client))
    }
}
