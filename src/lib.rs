//! Atelier: upload a room photo, redesign it in a decor style with a remote
//! generative model, refine it by chat and keep favourites on a mood board.

pub mod ai;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod mood_board;
pub mod orchestrator;
pub mod session;
pub mod storage;
pub mod theme;
pub mod types;

#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;
