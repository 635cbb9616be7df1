//! # forcelink-io
//!
//! Input/output boundary of the forcelink participant.
//!
//! - [`point_cloud`] reads delimited coordinate files into flat buffers
//! - [`settings`] holds the participant's configuration record and its
//!   TOML document form
//! - [`validator`] rejects unusable settings and point clouds up front
//! - [`forces_csv`] formats the diagnostic sample table written at shutdown

pub mod forces_csv;
pub mod point_cloud;
pub mod settings;
pub mod validator;

pub use forces_csv::SampleRow;
pub use point_cloud::{ParsePolicy, PointCloudLoader};
pub use settings::Settings;
