//! Browser-driven verification of web pages over the Chrome DevTools Protocol.
//!
//! The harness launches a Chromium [`Session`] against a file or URL, locates
//! elements through [`Selector`]s and [`ElementHandle`]s, waits on page
//! conditions with [`Wait`], runs scripted probes against the page's own
//! JavaScript, and inspects the raw static assets a page is served from.
//!
//! ```ignore
//! use pagecheck::{Selector, Session, SessionOptions, Target};
//!
//! let session = Session::start(&Target::file("site/index.html"), SessionOptions::default()).await?;
//! let wait = session.wait();
//! let input = wait.clickable(session.page(), &Selector::id("search-input")).await?;
//! input.type_text("harry potter").await?;
//! session.stop().await?;
//! ```

pub mod assets;
pub mod chrome;
pub mod config;
pub mod error;
pub mod page;
pub mod probe;
pub mod query;
pub mod selector;
pub mod session;
pub mod testing;
pub mod wait;

pub use assets::AssetSnapshot;
pub use config::{LoadStrategy, SessionOptions};
pub use error::{HarnessError, Result};
pub use page::{Page, PageLike};
pub use probe::ProbeResult;
pub use query::{ElementHandle, find, find_all};
pub use selector::Selector;
pub use session::{Session, Target};
pub use wait::Wait;
