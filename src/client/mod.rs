//! Client-side page logic: countdown, news ticker and share dialog.
//!
//! These types hold the presentation state of the public page. Rendering is
//! left to the embedding frontend.

/// Elapsed-time counter
pub mod countdown;
/// HTTP data source
pub mod remote;
/// Share dialog
pub mod share;
/// Scrolling news banner
pub mod ticker;
