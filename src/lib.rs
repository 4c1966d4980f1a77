//! # verkada-client - blocking client for the Verkada REST API
//!
//! Typed access to the access control, camera, guest, Helix, sensor,
//! classic alarm and viewing station endpoints. Each method maps to one HTTP
//! endpoint: it validates its inputs, builds the query and body, sends the
//! request and decodes the JSON answer into a typed response.
//!
//! ## Features
//!
//! - API key exchange for short-lived session tokens, renewed transparently
//! - Region selection (`prod1`, `prod2`, `au`) or a custom base URL
//! - Bounded retry with exponential backoff on HTTP 429
//! - Auto-pagination with partial results on failure
//! - Strict response decoding: undeclared fields are reported as errors
//! - Multipart uploads (CSV, JPEG) and file downloads
//!
//! ## Basic Usage
//!
//! ```no_run
//! use verkada_client::{Client, Config, Region};
//! use verkada_client::models::camera::AlertsOptions;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("my-api-key", Config::new(Region::Prod1))?;
//!
//!     let alerts = client
//!         .camera()
//!         .get_alerts(AlertsOptions {
//!             page_size: Some(100),
//!             ..Default::default()
//!         })
//!         .map_err(|partial| partial.into_error())?;
//!
//!     println!("{} notifications", alerts.notifications.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Credentials from a file
//!
//! [`Client::from_env`] reads `API_KEY` from the environment after loading
//! a `.env` file of `NAME: value` lines, if one exists.
//!
//! ```no_run
//! use verkada_client::{Client, Config};
//!
//! let client = Client::from_env(Config::default().with_auto_paginate(false))?;
//! let doors = client.access().get_doors(Default::default())?;
//! # Ok::<(), verkada_client::VerkadaError>(())
//! ```
//!
//! ## Partial pages
//!
//! Paginated methods return a [`PageResult`]. When a later page fails,
//! the pages fetched so far are kept in [`Partial::partial`].
//!
//! ```no_run
//! # use verkada_client::{Client, Config};
//! # let client = Client::new("key", Config::default())?;
//! match client.sensor().get_sensor_data("sensor-1", Default::default()) {
//!     Ok(data) => println!("{} readings", data.data.len()),
//!     Err(failure) => {
//!         if let Some(data) = &failure.partial {
//!             println!("kept {} readings before: {}", data.data.len(), failure.error);
//!         }
//!     }
//! }
//! # Ok::<(), verkada_client::VerkadaError>(())
//! ```

pub mod client;
pub mod env;
pub mod error;
pub mod models;
pub mod paginate;
pub mod query;
pub mod resources;
pub mod rest;
pub mod token;
pub mod transport;
pub mod validation;

pub use client::{Config, Region, RetryPolicy};
pub use error::{Result, VerkadaError};
pub use models::EmptyResponse;
pub use paginate::{PageResult, Paginated, Partial};
pub use query::{QueryParams, ScopedQuery};
pub use resources::{AccessApi, AlarmsApi, CameraApi, CoreApi, GuestApi, HelixApi, SensorApi, VxApi};
pub use rest::Client;
pub use token::{SessionToken, StreamingToken};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
