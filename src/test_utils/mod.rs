//! Helpers shared by the unit tests.

#![allow(missing_docs)]

mod db;
mod form;
mod html;
mod http;

pub(crate) use db::get_test_connection;
pub(crate) use form::{assert_form_input, assert_form_submit_button, assert_hx_endpoint, must_get_form};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_content_type, assert_hx_redirect, assert_status_ok};
