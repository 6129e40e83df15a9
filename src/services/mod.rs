//! Upstream HTTP clients
//!
//! One client per upstream service, reqwest-based. Clients are built once
//! at startup (only when their credential is configured) and cloned into
//! handlers via `AppState`.

pub mod plant_id_client;
pub mod weather_client;

pub use plant_id_client::{
    plant_probability, PlantIdClient, PlantIdError, PLANT_PROBABILITY_THRESHOLD,
};
pub use weather_client::{ForecastError, ForecastPlace, WeatherClient};
