//! `husktrack-api` — HTTP presentation layer over the coordinator and store.

pub mod app;
