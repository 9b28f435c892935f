//! # Lantern
//!
//! A minimal incremental static site generator. Markdown documents with
//! YAML front matter go in, templated HTML comes out, and only stale
//! targets are rebuilt.
//!
//! # Architecture: Staleness-Gated Pipeline
//!
//! Each build pass walks the source tree and pushes every *stale*
//! document through a three-step transformation:
//!
//! ```text
//! source tree ──► document loader ──► record ──► template ──► output tree
//!                       ▲                            ▲
//!                       └──── staleness oracle ──────┘
//! ```
//!
//! Staleness is decided purely from filesystem modification times: an
//! output is rebuilt unless it is strictly newer than both its source
//! document and the template it renders through. There is no manifest
//! and no cache database — the output tree itself is the incremental
//! state, so a deleted or touched output simply rebuilds on the next
//! pass. Rebuild cost is O(changed files), not O(site).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`stale`] | Staleness oracle — mtime comparison of an artifact against its sources |
//! | [`relroot`] | Root-relative prefix (`.`, `..`, `../..`) for any document depth |
//! | [`document`] | Loads a document: front matter mapping + rendered body + computed keys |
//! | [`markdown`] | pulldown-cmark pipeline — heading shift, anchor ids, extensions |
//! | [`template`] | Named template pool loaded once per build from `_templates/` |
//! | [`generate`] | Build orchestrator — static pass + document pass, returns "any updates?" |
//! | [`config`] | `_lantern.yaml` loading |
//! | [`setup`] | Scaffolds a new project tree |
//! | [`output`] | ANSI status lines |
//!
//! # Design Decisions
//!
//! ## The Filesystem Is the Cache
//!
//! Incremental builds need persisted state; here that state is nothing
//! more than output mtimes. This keeps the tool transparent — `rm -rf
//! _build` is a full cache wipe, `touch page.md` is a targeted
//! invalidation — at the cost of trusting timestamps, which is the
//! right trade for local builds.
//!
//! ## Dynamic Records, Not Typed Front Matter
//!
//! Template field sets are user-defined per document, so a record is a
//! YAML mapping, not a struct. Two computed keys are reserved and
//! always injected: `BODY` (rendered HTML) and `ROOT` (relative path
//! back to the site root, so one output tree serves from any mount
//! point).
//!
//! ## Fail the Whole Build
//!
//! A document without complete front matter, a missing template, or any
//! filesystem error aborts the entire pass. There is no per-document
//! skip-and-continue: partial output that looks complete is worse than
//! no output.
//!
//! ## Single-Threaded on Purpose
//!
//! One pass is a linear walk doing small renders; parallelism would buy
//! little and cost the simple "every target touched by exactly one unit
//! of work" reasoning.

pub mod config;
pub mod document;
pub mod generate;
pub mod markdown;
pub mod output;
pub mod relroot;
pub mod setup;
pub mod stale;
pub mod template;
