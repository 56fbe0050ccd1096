//! Controller layer: action dispatch, form state machine, keystroke
//! admission, validation, and debounced search.

pub mod events;
pub mod form;
pub mod input;
pub mod orchestration;
pub mod search;
pub mod validation;
