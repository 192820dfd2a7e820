//! Drag/Resize Engine for Backdrop Panels
//!
//! This crate turns a stream of raw pointer events into live geometry
//! changes of a rectangular panel on the Backdrop desktop:
//! - Geometry sampling from resolved styles with layout-box fallback
//! - Single-flight frame scheduling with an optional 30 Hz economy cap
//! - Batched style writes (commit writes and transform-based live writes)
//! - Drag and resize sessions with a begin/update/end lifecycle
//! - Viewport bounds clamping for drag
//!
//! ## Architecture
//!
//! - [`math`]: Geometry types (`Vec2`, `Size`, `Rect`, `TransformMatrix`) and clamping
//! - [`host`]: The [`ElementHost`] seam between the engine and a renderer
//! - [`geometry`]: Reading a panel's current rectangle back from its host
//! - [`frame`]: Per-refresh scheduling and coordinate debouncing
//! - [`style`]: Declaration batching and transform serialization
//! - [`session`]: The drag/resize state machine
//! - [`panel`]: A host panel tying handles, configuration and a session together
//!
//! ## Example
//!
//! ```rust
//! use backdrop_panel::{MemoryHost, Panel, PanelConfig, PointerInput, SessionKind};
//!
//! let mut host = MemoryHost::new(1024.0, 768.0);
//! let container = host.create_element();
//! let title_bar = host.create_element();
//!
//! let mut panel = Panel::new(container, None, PanelConfig::default());
//! panel.add_drag_handle("main", title_bar).unwrap();
//! panel.mount(&mut host).unwrap();
//!
//! panel
//!     .pointer_down(&mut host, SessionKind::Drag, "main", PointerInput::new(110.0, 110.0, 1))
//!     .unwrap();
//! panel.pointer_move(PointerInput::new(210.0, 160.0, 1));
//! panel.run_frame(&mut host, 16.0);
//! let commit = panel.pointer_up(&mut host, PointerInput::new(210.0, 160.0, 1)).unwrap();
//!
//! assert_eq!(commit.rect.left, 200.0);
//! assert_eq!(commit.rect.top, 150.0);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: No browser dependency; `backdrop-web` supplies the DOM host
//! 2. **Time Abstraction**: Frame ticks and debouncing take explicit timestamps
//! 3. **Owned Sessions**: Session state lives in the panel that created it, never in globals
//! 4. **Degrade, Don't Fail**: Pointer paths skip work on unbound elements instead of erroring

pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod host;
pub mod math;
pub mod panel;
pub mod session;
pub mod style;

mod types;

pub use config::{PanelConfig, Quality};
pub use error::{PanelError, PanelResult};
pub use frame::{CoordsDebouncer, FrameHandle, FrameScheduler, ECO_FRAME_INTERVAL_MS};
pub use geometry::{sample_rect, sample_transform};
pub use host::{ElementHost, LayoutBox, MemoryHost};
pub use math::{clamp_to_viewport, Rect, Size, TransformMatrix, Vec2};
pub use panel::Panel;
pub use session::{Commit, InteractionSession, Session, SessionKind, UpdateOutcome};
pub use style::{StyleDeclarations, TransformList};
pub use types::{ElementId, PointerId, PointerInput};
