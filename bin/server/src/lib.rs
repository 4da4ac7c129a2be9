//! langbuddy web server and UI.
//!
//! This crate serves the index page and the tool routes, rendering HTML
//! fragments with Leptos for htmx to swap into the page.

#![allow(non_snake_case)]

pub mod config;
pub mod error;
pub mod fragments;
pub mod pages;
pub mod routes;
pub mod state;
