//! Multimodal route planner.
//!
//! Finds bus and train itineraries through a static timetable, optimising
//! for total travel time, total price or number of transfers, and serves
//! them over HTTP.

pub mod domain;
pub mod planner;
pub mod timetable;
pub mod web;
