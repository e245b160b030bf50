//! # Pickbox App
//!
//! The demo host around the select widget:
//!
//! - **Config** ([`config`]): base URL, message mode, timeout from `pickbox.toml`
//! - **Backends** ([`http`], [`mock`]): the option source and selection sink
//! - **Slices** ([`slices`]): catalog loading and selection/submission state
//! - **App** ([`app`]): four corner widgets bound to one selected value
//!
//! ## Example
//!
//! ```
//! use pickbox_app::{App, AppConfig, FetchMode, MockBackend, SubmitMode};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut app = App::new(MockBackend::new(), AppConfig::default());
//! app.load_options(FetchMode::Ok).await;
//! app.set_value(Some("7".to_string()));
//! app.submit(SubmitMode::Ok).await;
//!
//! assert_eq!(
//!     app.selection().message.as_deref(),
//!     Some("Selected option 7 accepted successfully.")
//! );
//! # });
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod slices;
pub mod view;

pub use api::{
    decode_catalog, AnyBackend, FetchMode, OptionSource, SelectionSink, SubmitMode,
    SubmitReceipt,
};
pub use app::{App, Corner, DemoCase};
pub use config::{AppConfig, MessageMode, CONFIG_FILE};
pub use error::{ApiError, AppError, ConfigError, Result};
pub use http::HttpBackend;
pub use mock::MockBackend;
pub use slices::{LoadStatus, Notice, NoticeKind, OptionsState, SelectionState};
