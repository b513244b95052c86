//! Deterministic quest player.
//!
//! A [`Player`] borrows an immutable [`quest::Quest`] and drives any number
//! of [`GameState`]s through it. All randomness comes from a per-session
//! [`Alea`] generator seeded from a string, so a session is fully described
//! by its seed and its choices. The resulting [`GameLog`] can be handed to
//! an independent verifier, which replays it with [`Player::replay`].
//!
//! # Design Principles
//!
//! - **Seeded** - The seed is the only entropy; draws are consumed in ascending slot order.
//! - **All-or-nothing** - A rejected `choose` leaves the state untouched.
//! - **Portable snapshots** - Snapshots store the seed and draw count, never generator internals.
//!
//! # Example
//!
//! ```
//! use player::{Player, Status};
//! use quest::{Ending, Jump, JumpId, Location, LocationId, QuestBuilder};
//!
//! let quest = QuestBuilder::new()
//!     .location(Location::new(LocationId::new(1)).start())
//!     .location(Location::new(LocationId::new(2)).ending(Ending::Success))
//!     .jump(Jump::new(JumpId::new(1), LocationId::new(1), LocationId::new(2)))
//!     .build()
//!     .unwrap();
//!
//! let player = Player::new(&quest);
//! let mut state = player.start(Some("abc")).unwrap();
//! player.choose(&mut state, JumpId::new(1)).unwrap();
//! assert_eq!(state.status(), Status::Won);
//!
//! let verified = player.replay(state.log()).unwrap();
//! assert_eq!(verified.status(), Status::Won);
//! ```

mod error;
mod eval;
mod log;
mod player;
mod rng;
mod snapshot;
mod state;
mod text;

pub use error::{Divergence, PlayerError, PlayerResult, SnapshotIssue};
pub use eval::{apply_change, apply_changes, evaluate_criteria};
pub use log::{GameLog, LogEntry};
pub use player::{Player, SEED_LEN};
pub use rng::{Alea, RandomSource};
pub use snapshot::{export_state, StateSnapshot, SNAPSHOT_VERSION};
pub use state::{GameState, Status, Termination};
pub use text::{param_lines, render_text};
