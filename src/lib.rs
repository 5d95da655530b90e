//! MyndSpace core: headless state engine for a virtual study-room client.
//!
//! The crate models the client-side session state of a study-room product:
//! a dashboard of room listings, a joinable room session with chat threads
//! (an AI tutor and a public channel), floating widgets, a Pomodoro
//! countdown, and a camera/presence controller. All data is in-memory;
//! the only outbound call is one generative-text request per tutor
//! question.
//!
//! The view layer consumes snapshots and calls operations; nothing in
//! here depends on any rendering detail.

pub mod app;
pub mod catalog;
pub mod profile;
pub mod session;
pub mod tutor;
