//! # notifeed Core Library
//!
//! This library provides the state and interaction logic for a notification
//! summary widget: incoming notifications are grouped per source, each
//! source gets a swipe-to-delete summary card, and tapping a card opens a
//! read-only detail view. Renderers (the `notifeed` CLI, or any GUI shell)
//! are thin layers over the same core.
//!
//! ## Architecture
//!
//! - **Aggregation**: pure per-source grouping, recomputed on every render
//! - **Timestamp formatting**: relative-age labels against a caller-supplied "now"
//! - **Swipe**: a pan recognizer on the input thread talks to a per-source
//!   state machine on the render thread through a two-message channel
//! - **Cards**: render-ready views with spring-settled offsets and eased
//!   height/opacity collapse
//! - **Storage**: injected notification stores and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`NotificationWidget`]: single owner of the list; drives everything else
//! - [`SwipeController`]: per-source swipe state machine
//! - [`PanRecognizer`]: gesture-thread activation, clamping and release decision
//! - [`NotificationStore`]: trait for notification sources
//! - [`Config`]: widget configuration management

pub mod aggregate;
pub mod card;
pub mod error;
pub mod events;
pub mod notification;
pub mod storage;
pub mod swipe;
pub mod timefmt;
pub mod widget;

pub use aggregate::{known_groups, SourceGroup};
pub use card::{CardView, Collapse, DetailView};
pub use error::{ConfigError, CoreError, StoreError};
pub use events::{DeleteTrigger, Event};
pub use notification::{Notification, Source};
pub use storage::{Config, JsonFileStore, MemoryStore, NotificationStore};
pub use swipe::{
    gesture_channel, GestureMessage, PanRecognizer, ReleaseDecision, SpringConfig, SwipeConfig,
    SwipeController, SwipeState,
};
pub use timefmt::format_relative;
pub use widget::NotificationWidget;
