//! Contact form state: field values, validation and the simulated send.
//!
//! Nothing is transmitted. An accepted submission only moves the form into
//! `Submitting`; the owning page completes it when its delay timer fires.

mod form;

pub use form::{
    ContactFields, ContactForm, Field, FieldError, FieldErrors, SUCCESS_NOTICE, SubmitOutcome,
    validate,
};
