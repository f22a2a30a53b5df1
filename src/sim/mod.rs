//! Game-agnostic session engine
//!
//! All gameplay logic flows through here. This module must stay pure:
//! - Seeded RNG only
//! - Time advances only through `Session::advance`
//! - No rendering or platform dependencies

pub mod rng;
pub mod session;
pub mod timers;

pub use rng::GameRng;
pub use session::{Ctx, Outcome, Phase, RoundGame, Session, Snapshot};
pub use timers::{TimerHandle, Timers};
