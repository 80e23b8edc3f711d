/*!
 * Orchestration of the full shaping flow.
 *
 * The canonical pipeline is: parse, redistribute, split (coarse threshold),
 * redistribute, split (finer threshold), redistribute, serialize. The first
 * splitting pass removes grossly oversized cards and the redistribution that
 * follows evens the timing back out before the second pass fine-tunes what
 * remains.
 *
 * Everything here is pure and synchronous: each call takes an immutable input
 * and produces a fresh result, so callers may shape many transcripts in
 * parallel without any coordination.
 */

use anyhow::{Result, anyhow};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::reflow::redistribute_source_text;
use crate::retime::{
    DEFAULT_GAP_MS, DEFAULT_MIN_DURATION_MS, RetimeConfig, redistribute_transcript,
};
use crate::grouping::DEFAULT_MAX_GAP_MS;
use crate::segment::Segment;
use crate::splitting::{
    DEFAULT_MIN_CHILD_DURATION_MS, DEFAULT_NOISE_FLOOR_MS, SplitConfig, split_pass,
};
use crate::transcript;

fn default_max_gap_ms() -> u64 {
    DEFAULT_MAX_GAP_MS
}

fn default_min_duration_ms() -> u64 {
    DEFAULT_MIN_DURATION_MS
}

fn default_gap_ms() -> u64 {
    DEFAULT_GAP_MS
}

fn default_first_pass_char_limit() -> usize {
    60
}

fn default_second_pass_char_limit() -> usize {
    40
}

fn default_min_child_duration_ms() -> u64 {
    DEFAULT_MIN_CHILD_DURATION_MS
}

fn default_noise_floor_ms() -> u64 {
    DEFAULT_NOISE_FLOOR_MS
}

/// All tunable knobs of the shaping engine, with their stated defaults
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    /// Maximum gap (ms) for segments to share a continuity group
    #[serde(default = "default_max_gap_ms")]
    pub max_gap_ms: u64,

    /// Minimum duration (ms) per redistributed segment
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,

    /// Gap (ms) between redistributed segments and between split children
    #[serde(default = "default_gap_ms")]
    pub gap_ms: u64,

    /// Character threshold for the first (coarse) splitting pass
    #[serde(default = "default_first_pass_char_limit")]
    pub first_pass_char_limit: usize,

    /// Character threshold for the second (fine) splitting pass
    #[serde(default = "default_second_pass_char_limit")]
    pub second_pass_char_limit: usize,

    /// Minimum duration (ms) per split child
    #[serde(default = "default_min_child_duration_ms")]
    pub min_child_duration_ms: u64,

    /// Absolute duration floor (ms) below which a segment is dropped
    #[serde(default = "default_noise_floor_ms")]
    pub noise_floor_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_gap_ms: default_max_gap_ms(),
            min_duration_ms: default_min_duration_ms(),
            gap_ms: default_gap_ms(),
            first_pass_char_limit: default_first_pass_char_limit(),
            second_pass_char_limit: default_second_pass_char_limit(),
            min_child_duration_ms: default_min_child_duration_ms(),
            noise_floor_ms: default_noise_floor_ms(),
        }
    }
}

impl EngineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_duration_ms == 0 {
            return Err(anyhow!("min_duration_ms must be greater than 0"));
        }
        if self.min_child_duration_ms == 0 {
            return Err(anyhow!("min_child_duration_ms must be greater than 0"));
        }
        if self.first_pass_char_limit == 0 || self.second_pass_char_limit == 0 {
            return Err(anyhow!("split character limits must be greater than 0"));
        }
        if self.noise_floor_ms > self.min_child_duration_ms {
            return Err(anyhow!(
                "noise_floor_ms ({}) must not exceed min_child_duration_ms ({})",
                self.noise_floor_ms,
                self.min_child_duration_ms
            ));
        }
        Ok(())
    }

    fn retime_config(&self) -> RetimeConfig {
        RetimeConfig {
            max_gap_ms: self.max_gap_ms,
            min_duration_ms: self.min_duration_ms,
            gap_ms: self.gap_ms,
        }
    }

    fn split_config(&self) -> SplitConfig {
        SplitConfig {
            min_child_duration_ms: self.min_child_duration_ms,
            child_gap_ms: self.gap_ms,
            noise_floor_ms: self.noise_floor_ms,
        }
    }
}

/// Outcome of a shaping run: the rendered transcript plus everything the
/// engine noticed along the way
#[derive(Debug)]
pub struct ShapeResult {
    /// Rendered transcript in the block format
    pub output: String,
    /// Number of segments parsed from the input
    pub segments_in: usize,
    /// Number of segments in the output
    pub segments_out: usize,
    /// Diagnostics recorded during the run
    pub diagnostics: Vec<Diagnostic>,
}

/// The shaping engine: timing redistribution and two-pass splitting
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Create an engine with the given configuration
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Redistribute timing only: parse, retime within continuity groups,
    /// serialize. No splitting.
    pub fn redistribute(&self, content: &str) -> ShapeResult {
        let mut diagnostics = DiagnosticSink::new();
        let segments = transcript::parse(content, &mut diagnostics);
        let segments_in = segments.len();

        let shaped =
            redistribute_transcript(&segments, &self.config.retime_config(), &mut diagnostics);

        ShapeResult {
            output: transcript::serialize(&shaped),
            segments_in,
            segments_out: shaped.len(),
            diagnostics: diagnostics.into_entries(),
        }
    }

    /// Run the full shaping flow on raw transcript content.
    ///
    /// Parse, redistribute, split at the coarse threshold, redistribute,
    /// split at the fine threshold, redistribute, serialize.
    pub fn reshape(&self, content: &str) -> ShapeResult {
        let mut diagnostics = DiagnosticSink::new();
        let segments = transcript::parse(content, &mut diagnostics);
        let segments_in = segments.len();

        let shaped = self.reshape_segments(segments, &mut diagnostics);

        ShapeResult {
            output: transcript::serialize(&shaped),
            segments_in,
            segments_out: shaped.len(),
            diagnostics: diagnostics.into_entries(),
        }
    }

    /// The full shaping flow over already-parsed segments
    pub fn reshape_segments(
        &self,
        segments: Vec<Segment>,
        diagnostics: &mut DiagnosticSink,
    ) -> Vec<Segment> {
        if segments.is_empty() {
            return segments;
        }

        let retime = self.config.retime_config();
        let split = self.config.split_config();

        let shaped = redistribute_transcript(&segments, &retime, diagnostics);

        debug!(
            "Pass 1: splitting segments over {} chars",
            self.config.first_pass_char_limit
        );
        let shaped = split_pass(&shaped, self.config.first_pass_char_limit, &split, diagnostics);
        let shaped = redistribute_transcript(&shaped, &retime, diagnostics);

        debug!(
            "Pass 2: splitting segments over {} chars",
            self.config.second_pass_char_limit
        );
        let shaped = split_pass(&shaped, self.config.second_pass_char_limit, &split, diagnostics);
        redistribute_transcript(&shaped, &retime, diagnostics)
    }

    /// Re-flow an original-language transcript onto shaped boundaries.
    ///
    /// `original` supplies the word stream; `shaped` supplies timing and
    /// segment count (typically the output of [`Engine::reshape`] over the
    /// translated transcript).
    pub fn reflow_original(&self, original: &str, shaped: &str) -> ShapeResult {
        let mut diagnostics = DiagnosticSink::new();
        let original_segments = transcript::parse(original, &mut diagnostics);
        let shaped_segments = transcript::parse(shaped, &mut diagnostics);
        let segments_in = original_segments.len();

        let reflowed =
            redistribute_source_text(&original_segments, &shaped_segments, &mut diagnostics);

        ShapeResult {
            output: transcript::serialize(&reflowed),
            segments_in,
            segments_out: reflowed.len(),
            diagnostics: diagnostics.into_entries(),
        }
    }
}
