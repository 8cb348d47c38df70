//! Auth-state synchronization.
//!
//! Server-driven auth actions (login and logout forms resolving against the
//! commerce backend) and client subscribers (header, wishlist, account
//! views) meet here. The manager owns the event channels and a coarse
//! current state; subscribers keep their own session details fresh.

mod manager;

pub use manager::*;
