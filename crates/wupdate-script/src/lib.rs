//! # wupdate-script
//!
//! A small line-oriented language for update workflows.
//!
//! Statements end with `;` and start with an upper-case keyword:
//!
//! ```text
//! SET DEST = "/opt/app";
//! MKDIR DEST;
//! DOWNLOAD https://example.com/app.tar TO /opt/app/app.tar;
//! READ ANSWER;
//! IF ANSWER == "y";
//!   PRINT "upgrading";
//! ELSE;
//!   PRINT "skipped";
//! ENDIF;
//! ```
//!
//! Source text is compiled with [`parser::parse`] into a [`ast::Script`] and
//! run by [`executor::ScriptExecutor`]. Statements that do not parse are
//! dropped, and statement failures never abort a run.

pub mod ast;
pub mod error;
pub mod executor;
pub mod parser;
pub mod runtime;
pub mod text;
