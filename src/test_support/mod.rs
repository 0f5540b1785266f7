//! Shared helpers for socket-bound unit tests.

pub mod socket_guard;
