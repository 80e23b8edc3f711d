/*!
 * # subshape - subtitle timing & segmentation engine
 *
 * A Rust library for reshaping machine-generated subtitle transcripts:
 * re-splitting oversized caption cards at natural boundaries and
 * redistributing timestamps proportionally to word count while preserving
 * the original boundaries of each continuous utterance.
 *
 * ## Features
 *
 * - Tolerant parsing of the blank-line-separated subtitle block format
 * - Continuity grouping of caption cards into utterances
 * - Word-proportional timing redistribution that preserves group boundaries
 * - Two-pass splitting of oversized cards (punctuation, word boundary,
 *   forced midpoint) with word-proportional sub-timing
 * - Re-flowing an original-language word stream onto shaped boundaries
 * - A validated exchange format for an external translation collaborator
 * - Structured diagnostics instead of print-based logging
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: timestamp parsing and formatting
 * - `segment`: the core `Segment` data model and word counting
 * - `transcript`: block-format parsing and canonical serialization
 * - `grouping`: continuity grouping
 * - `retime`: proportional timing redistribution
 * - `splitting`: oversized-segment splitting
 * - `reflow`: original-text redistribution over shaped boundaries
 * - `exchange`: the translation collaborator exchange format
 * - `pipeline`: the `Engine` orchestrating the full shaping flow
 * - `diagnostics`: the structured diagnostics channel
 * - `errors`: typed error definitions
 *
 * The engine is pure, synchronous and re-entrant: every operation takes an
 * immutable input and returns a new value, so transcripts can be shaped in
 * parallel threads without coordination.
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod diagnostics;
pub mod errors;
pub mod exchange;
pub mod grouping;
pub mod pipeline;
pub mod reflow;
pub mod retime;
pub mod segment;
pub mod splitting;
pub mod timecode;
pub mod transcript;

// Re-export main types for easier usage
pub use diagnostics::{Diagnostic, DiagnosticSink, Severity};
pub use errors::{EngineError, ExchangeError};
pub use pipeline::{Engine, EngineConfig, ShapeResult};
pub use segment::Segment;
