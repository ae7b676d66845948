//! HTTP request handlers.

pub(crate) mod docs;
pub(crate) mod health;
pub(crate) mod llms;
pub(crate) mod pages;
pub(crate) mod projects;
pub(crate) mod robots;
