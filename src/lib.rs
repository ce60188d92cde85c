//! gradiff core library
//!
//! Compares a starter code archive against student submission archives and
//! produces line-level diffs grouped by file and by submitter. The library
//! never prints or touches the filesystem; callers supply archive bytes and
//! render the returned values.

pub mod archive;
pub mod compare;
pub mod diff;
