//! End-to-end tests driving the serve loop over in-memory streams

mod support;
mod tool_calls;
