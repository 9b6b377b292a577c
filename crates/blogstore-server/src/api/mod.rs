// ABOUTME: API module containing the HTTP handler functions for the blogstore REST API.

pub mod blogs;
