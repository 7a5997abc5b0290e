pub mod api;
pub mod config;
pub mod controller;
pub mod data_models;
pub mod error;
pub mod navigator;
pub mod reporter;
pub mod session;
pub mod view;
