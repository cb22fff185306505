//! Typed messages of the subtitle service API
//!
//! Each call is described by its method name, a function producing its
//! positional parameters, and a parser for its response value.

pub mod auth;
pub mod search;

pub use auth::{LOGIN_METHOD, LOGOUT_METHOD, LoginRequest, LoginResponse, Session, logout_params};
pub use search::{
    SEARCH_METHOD, SearchCriteria, SubtitleRecord, parse_search_response, search_params,
};
