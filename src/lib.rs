//! Coordinate mapping and gesture arbitration for a touch-driven basketball
//! court diagram.
//!
//! The host reports container layout and raw pointer events. The crate maps
//! touches through three frames (canvas, logical court grid, diagram source),
//! classifies shots as inside or outside the three-point arc, decides which
//! gesture a press was, and keeps the ordered list of shot markers. Results
//! leave as [`engine::Action`]s, render data, and [`events::DomainEvent`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Main-context [`engine::Engine`], testable [`engine::EngineCore`], and the gesture worker |
//! | [`arbiter`] | Gesture state machine: tap, multi-tap, long press, drag |
//! | [`input`] | Pointer events and recognizer state |
//! | [`layout`] | Container tracking and letterboxed diagram fit |
//! | [`transform`] | Canvas to logical and canvas to source conversions |
//! | [`region`] | Court halves and three-point arc classification |
//! | [`marker`] | Marker model and the in-memory store |
//! | [`hit`] | Hit-testing markers |
//! | [`render`] | Draw-ready projection of the store |
//! | [`events`] | Domain events and the non-blocking event sink |
//! | [`config`] | Environment-driven configuration |
//! | [`error`] | Rejected pointer input |
//! | [`geom`] | Points and rectangles |
//! | [`consts`] | Court dimensions and gesture defaults |

pub mod arbiter;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod events;
pub mod geom;
pub mod hit;
pub mod input;
pub mod layout;
pub mod marker;
pub mod region;
pub mod render;
pub mod transform;
