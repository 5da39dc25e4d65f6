//! Builtin codec library: lexical rules shared by the loader's decode
//! table and the dumper's encode table.
//!
//! - [`tags`] — tag-string constants for every builtin type.
//! - [`scalar`] — null/bool/int/float forms, including base-60.
//! - [`binary`] — base64 transport for byte blobs.
//! - [`timestamp`] — the timestamp form, normalized to UTC.
//!
//! Everything here is a pure function of scalar text; per-call state
//! lives in the loader and dumper.

pub mod binary;
pub mod scalar;
pub mod tags;
pub mod timestamp;
