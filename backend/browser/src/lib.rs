//! Capture Driver
//!
//! Launches an isolated headless browser per capture, prunes the live page
//! down to one content region, and writes a fixed-size PNG clip.

pub mod chromium;
pub mod driver;
pub mod prune;
pub mod session;

pub use chromium::ChromiumLauncher;
pub use driver::{CaptureDriver, CaptureRequest};
pub use prune::{prune_document, prune_script, PruneError};
pub use session::{BrowserLauncher, BrowserSession};
