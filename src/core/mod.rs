//! Core library modules for traffic-manager
//!
//! The road network and the vehicle queue are independent; the service
//! composes them behind one façade.

pub mod error;
pub mod graph;
pub mod options;
pub mod queue;
pub mod service;

