//! Serial event grammar

mod grammar;

pub use grammar::{
    EventGrammar, EventMatch, EventRule, PARAMETER_SENTINEL, PLACEHOLDER,
};
