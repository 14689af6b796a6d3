//! Ping output parsing strategies
//!
//! Ping output is free-form, human-readable and version dependent, so the
//! mapping from captured text to a latency reading is a pluggable strategy.
//! A parser returns `None` when the text holds no reading; the caller treats
//! that the same as a failed invocation.

use crate::probe::platform::PingFlavor;
use crate::types::ParserKind;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Marker printed by the Windows ping utility for sub-millisecond replies
pub const SUB_MILLISECOND_MARKER: &str = "<1ms";

/// Extracts a whole-millisecond latency from one invocation's captured text
pub trait OutputParser: Send + Sync + fmt::Debug {
    /// Strategy name for logs
    fn name(&self) -> &'static str;

    /// Latency in milliseconds, or `None` if the text holds no reading
    fn parse(&self, output: &str) -> Option<u32>;
}

fn equals_ms_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"=(\d+)ms").expect("latency marker pattern is valid"))
}

fn time_field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"time[=<]\s*(\d+)(?:\.\d+)?\s*ms").expect("time field pattern is valid")
    })
}

/// `<1ms` resolves to 0, otherwise the first `=<N>ms` match
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerParser;

impl OutputParser for MarkerParser {
    fn name(&self) -> &'static str {
        "marker"
    }

    fn parse(&self, output: &str) -> Option<u32> {
        if output.contains(SUB_MILLISECOND_MARKER) {
            return Some(0);
        }

        equals_ms_pattern()
            .captures_iter(output)
            .find_map(|caps| caps[1].parse().ok())
    }
}

/// Marker rules first, then iputils/BSD `time=12.3 ms` readings.
///
/// Fractional milliseconds are truncated, so sub-millisecond replies read as 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct IputilsParser;

impl OutputParser for IputilsParser {
    fn name(&self) -> &'static str {
        "iputils"
    }

    fn parse(&self, output: &str) -> Option<u32> {
        if let Some(ms) = MarkerParser.parse(output) {
            return Some(ms);
        }

        time_field_pattern()
            .captures_iter(output)
            .find_map(|caps| caps[1].parse().ok())
    }
}

/// Build the parser for a configured strategy
pub fn parser_for(kind: ParserKind, flavor: PingFlavor) -> Arc<dyn OutputParser> {
    match kind {
        ParserKind::Auto => parser_for(flavor.default_parser(), flavor),
        ParserKind::Marker => Arc::new(MarkerParser),
        ParserKind::Iputils => Arc::new(IputilsParser),
    }
}
