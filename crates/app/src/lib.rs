//! NoteVox application: real-time Indian currency note identification with
//! spoken results, for visually-impaired users.

pub mod display;
pub mod keys;
pub mod policy;
pub mod session;
